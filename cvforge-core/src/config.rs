use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

mod builtin;

/// Ordered string → string rule table. BTreeMap keeps iteration, and
/// therefore candidate registration order, deterministic.
pub type RuleTable = BTreeMap<String, String>;

// Default value functions for serde
fn default_true() -> bool {
    true
}

/// Immutable set of rule tables driving every candidate generator.
///
/// Loaded once at startup (built-in defaults, optionally overridden from a
/// YAML file) and shared by reference for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBook {
    /// Which generators run and in what order
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Weak verb lemma → power verb lemma
    #[serde(default = "builtin::power_verbs")]
    pub power_verbs: RuleTable,
    /// Everyday verb lemma → professional verb lemma
    #[serde(default = "builtin::professional_verbs")]
    pub professional_verbs: RuleTable,
    /// Weak adjective lemma → strong adjective
    #[serde(default = "builtin::weak_adjectives")]
    pub weak_adjectives: RuleTable,
    /// Weak phrase → strong phrase
    #[serde(default = "builtin::weak_phrases")]
    pub weak_phrases: RuleTable,
    /// Passive construction → active construction
    #[serde(default = "builtin::passive_to_active")]
    pub passive_to_active: RuleTable,
    #[serde(default)]
    pub filler: FillerConfig,
    /// Casual noun → executive terminology
    #[serde(default = "builtin::executive_vocabulary")]
    pub executive_vocabulary: RuleTable,
    #[serde(default)]
    pub quantification: QuantificationConfig,
    #[serde(default)]
    pub industry: IndustryConfig,
    /// Basic skill phrase → keyword-rich skill phrase
    #[serde(default = "builtin::skill_upgrades")]
    pub skill_upgrades: RuleTable,
    #[serde(default)]
    pub keyword_boosts: KeywordBoostConfig,
    /// Misspelling → correction
    #[serde(default = "builtin::spelling")]
    pub spelling: RuleTable,
    #[serde(default)]
    pub punctuation: PunctuationConfig,
    #[serde(default)]
    pub capitalization: CapitalizationConfig,
    #[serde(default)]
    pub grammar: GrammarConfig,
    #[serde(default)]
    pub sentence_split: SentenceSplitConfig,
    #[serde(default)]
    pub structure: StructureConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Generators to run, in registration order. Order is the tie-break
    /// between candidates covering the same span.
    pub generators: Vec<GeneratorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Name of the generator
    pub name: String,
    /// Whether this generator is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl GeneratorConfig {
    fn enabled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
        }
    }
}

/// Registration order of the standard generators.
pub const STANDARD_GENERATORS: &[&str] = &[
    "WeakPhrases",
    "PassiveVoice",
    "PowerVerbs",
    "ProfessionalVerbs",
    "WeakAdjectives",
    "ExecutiveVocabulary",
    "FillerWords",
    "Quantification",
    "IndustryKeywords",
    "SkillUpgrades",
    "TechnicalKeywords",
    "BusinessKeywords",
    "SoftSkillKeywords",
    "TrendingKeywords",
    "Spelling",
    "Punctuation",
    "Capitalization",
    "VerbTense",
    "ArticleUsage",
    "SubjectVerbAgreement",
    "SentenceSplit",
    "Structure",
];

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generators: STANDARD_GENERATORS
                .iter()
                .map(|name| GeneratorConfig::enabled(name))
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Disable a generator by name. Returns false when no entry matched.
    pub fn disable(&mut self, name: &str) -> bool {
        let mut found = false;
        for generator in &mut self.generators {
            if generator.name.eq_ignore_ascii_case(name) {
                generator.enabled = false;
                found = true;
            }
        }
        found
    }

    pub fn enabled_names(&self) -> impl Iterator<Item = &str> {
        self.generators
            .iter()
            .filter(|g| g.enabled)
            .map(|g| g.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillerConfig {
    /// Standalone filler words removed with whitespace/punctuation cleanup
    #[serde(default = "builtin::filler_words")]
    pub words: Vec<String>,
    /// Wordy phrases replaced by a shorter equivalent
    #[serde(default = "builtin::filler_phrases")]
    pub phrases: RuleTable,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            words: builtin::filler_words(),
            phrases: builtin::filler_phrases(),
        }
    }
}

fn default_lookahead_bytes() -> usize {
    50 // window after an achievement verb checked for existing numbers
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantificationConfig {
    /// Achievement verb → quantified phrase
    #[serde(default = "builtin::achievement_quantifiers")]
    pub patterns: RuleTable,
    /// Skip the verb when a digit appears within this many bytes after it
    #[serde(default = "default_lookahead_bytes")]
    pub lookahead_bytes: usize,
}

impl Default for QuantificationConfig {
    fn default() -> Self {
        Self {
            patterns: builtin::achievement_quantifiers(),
            lookahead_bytes: default_lookahead_bytes(),
        }
    }
}

fn default_min_triggers() -> usize {
    2
}

fn default_max_header_words() -> usize {
    5
}

fn default_bullet_count() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryRule {
    /// Terms whose presence signals the industry
    pub triggers: Vec<String>,
    /// Keywords injected when the industry fires (first three are used)
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryConfig {
    /// Distinct trigger terms required in the whole document
    #[serde(default = "default_min_triggers")]
    pub min_triggers: usize,
    /// Words marking a skills header line
    #[serde(default = "builtin::skill_section_headers")]
    pub skill_headers: Vec<String>,
    /// A skills header line has at most this many words
    #[serde(default = "default_max_header_words")]
    pub max_header_words: usize,
    /// Keyword bullets appended after a skills header
    #[serde(default = "default_bullet_count")]
    pub bullet_count: usize,
    #[serde(default = "builtin::industries")]
    pub industries: BTreeMap<String, IndustryRule>,
    /// Generic term → template; `{0}`, `{1}`, `{2}` expand to the industry's keywords
    #[serde(default = "builtin::generic_keyword_terms")]
    pub generic_terms: RuleTable,
}

impl Default for IndustryConfig {
    fn default() -> Self {
        Self {
            min_triggers: default_min_triggers(),
            skill_headers: builtin::skill_section_headers(),
            max_header_words: default_max_header_words(),
            bullet_count: default_bullet_count(),
            industries: builtin::industries(),
            generic_terms: builtin::generic_keyword_terms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingConfig {
    /// Distinct trigger terms required in the whole document
    #[serde(default = "default_min_triggers")]
    pub min_triggers: usize,
    /// Phrases after which a trending keyword is inserted, tried in order
    #[serde(default = "builtin::trending_injection_points")]
    pub injection_points: Vec<String>,
    /// Trending keyword → terms whose presence makes it relevant
    #[serde(default = "builtin::trending_keywords")]
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            min_triggers: default_min_triggers(),
            injection_points: builtin::trending_injection_points(),
            keywords: builtin::trending_keywords(),
        }
    }
}

/// Keyword-rich expansions of everyday résumé terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordBoostConfig {
    /// Generic tech term → specific technical phrase
    #[serde(default = "builtin::technical_boosts")]
    pub technical: RuleTable,
    /// Business term → business-outcome phrase
    #[serde(default = "builtin::business_boosts")]
    pub business: RuleTable,
    /// Soft skill → leadership-oriented phrase
    #[serde(default = "builtin::soft_skill_boosts")]
    pub soft_skills: RuleTable,
    #[serde(default)]
    pub trending: TrendingConfig,
}

impl Default for KeywordBoostConfig {
    fn default() -> Self {
        Self {
            technical: builtin::technical_boosts(),
            business: builtin::business_boosts(),
            soft_skills: builtin::soft_skill_boosts(),
            trending: TrendingConfig::default(),
        }
    }
}

fn default_min_words_for_period() -> usize {
    3 // lines with fewer words are treated as headers
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunctuationConfig {
    /// Literal spacing/punctuation fixes, applied in listed order
    #[serde(default = "builtin::spacing_fixes")]
    pub spacing_fixes: Vec<(String, String)>,
    /// Add a terminal period to lines with more words than this
    #[serde(default = "default_min_words_for_period")]
    pub min_words_for_period: usize,
    /// Line prefixes that mark a bullet (no terminal period added)
    #[serde(default = "builtin::bullet_markers")]
    pub bullet_markers: Vec<String>,
}

impl Default for PunctuationConfig {
    fn default() -> Self {
        Self {
            spacing_fixes: builtin::spacing_fixes(),
            min_words_for_period: default_min_words_for_period(),
            bullet_markers: builtin::bullet_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalizationConfig {
    /// Uppercase the first letter after ". "
    #[serde(default = "default_true")]
    pub sentence_start: bool,
    /// Words ending in "." after which the next word is not a sentence start
    #[serde(default = "builtin::abbreviations")]
    pub abbreviations: Vec<String>,
    /// Standalone "i" → "I"
    #[serde(default = "default_true")]
    pub first_person_pronoun: bool,
    /// Lowercase product/company name → canonical casing
    #[serde(default = "builtin::proper_nouns")]
    pub proper_nouns: RuleTable,
}

impl Default for CapitalizationConfig {
    fn default() -> Self {
        Self {
            sentence_start: true,
            abbreviations: builtin::abbreviations(),
            first_person_pronoun: true,
            proper_nouns: builtin::proper_nouns(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Agreement error → correction ("data is" → "data are")
    #[serde(default = "builtin::agreement_fixes")]
    pub agreement: RuleTable,
    /// Present-tense verb → past tense, applied at the start of bullets and statements
    #[serde(default = "builtin::tense_fixes")]
    pub tense_fixes: RuleTable,
    /// Words starting with a silent "h" that take "an"
    #[serde(default = "builtin::silent_h_words")]
    pub silent_h: Vec<String>,
    /// Vowel-initial prefixes pronounced with a consonant sound, which take "a"
    #[serde(default = "builtin::consonant_sound_prefixes")]
    pub consonant_sound_prefixes: Vec<String>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            agreement: builtin::agreement_fixes(),
            tense_fixes: builtin::tense_fixes(),
            silent_h: builtin::silent_h_words(),
            consonant_sound_prefixes: builtin::consonant_sound_prefixes(),
        }
    }
}

fn default_max_sentence_words() -> usize {
    20
}

fn default_min_words_before_split() -> usize {
    8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceSplitConfig {
    /// Sentences with more words than this are split
    #[serde(default = "default_max_sentence_words")]
    pub max_words: usize,
    /// The left half must keep at least this many words
    #[serde(default = "default_min_words_before_split")]
    pub min_words_before_split: usize,
    /// Split points, tried in listed order
    #[serde(default = "builtin::split_connectors")]
    pub connectors: Vec<String>,
}

impl Default for SentenceSplitConfig {
    fn default() -> Self {
        Self {
            max_words: default_max_sentence_words(),
            min_words_before_split: default_min_words_before_split(),
            connectors: builtin::split_connectors(),
        }
    }
}

fn default_max_section_words() -> usize {
    3
}

/// Layout fixes applied when the document lacks bullets or section headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Lines mentioning one of these get a bullet when the document has none
    #[serde(default = "builtin::achievement_markers")]
    pub achievement_words: Vec<String>,
    /// Header → content words that identify a section title line
    #[serde(default = "builtin::section_headers")]
    pub section_headers: BTreeMap<String, Vec<String>>,
    /// A line longer than this is never turned into a header
    #[serde(default = "default_max_section_words")]
    pub max_header_words: usize,
    /// Convert "1. " list prefixes to bullets when the document has no bullets
    #[serde(default = "default_true")]
    pub numbered_to_bullets: bool,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            achievement_words: builtin::achievement_markers(),
            section_headers: builtin::section_headers(),
            max_header_words: default_max_section_words(),
            numbered_to_bullets: true,
        }
    }
}

/// Word lists for the built-in lexicon tagger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Verb lemmas known to the tagger in addition to the verb rule tables
    #[serde(default = "builtin::extra_verbs")]
    pub verbs: Vec<String>,
    /// Adjective lemmas known to the tagger in addition to `weak_adjectives`
    #[serde(default = "builtin::extra_adjectives")]
    pub adjectives: Vec<String>,
    /// Irregular inflected form → lemma
    #[serde(default = "builtin::irregular_forms")]
    pub irregular_forms: RuleTable,
    /// Words after which a token is read as a noun
    #[serde(default = "builtin::determiners")]
    pub determiners: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            verbs: builtin::extra_verbs(),
            adjectives: builtin::extra_adjectives(),
            irregular_forms: builtin::irregular_forms(),
            determiners: builtin::determiners(),
        }
    }
}

/// Word lists used by the four-dimension analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "builtin::weak_words")]
    pub weak_words: Vec<String>,
    #[serde(default = "builtin::action_verbs")]
    pub action_verbs: Vec<String>,
    /// Category → keywords counted for keyword usage
    #[serde(default = "builtin::keyword_catalogue")]
    pub keyword_catalogue: BTreeMap<String, Vec<String>>,
    #[serde(default = "builtin::stop_words")]
    pub stop_words: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weak_words: builtin::weak_words(),
            action_verbs: builtin::action_verbs(),
            keyword_catalogue: builtin::keyword_catalogue(),
            stop_words: builtin::stop_words(),
        }
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            power_verbs: builtin::power_verbs(),
            professional_verbs: builtin::professional_verbs(),
            weak_adjectives: builtin::weak_adjectives(),
            weak_phrases: builtin::weak_phrases(),
            passive_to_active: builtin::passive_to_active(),
            filler: FillerConfig::default(),
            executive_vocabulary: builtin::executive_vocabulary(),
            quantification: QuantificationConfig::default(),
            industry: IndustryConfig::default(),
            skill_upgrades: builtin::skill_upgrades(),
            keyword_boosts: KeywordBoostConfig::default(),
            spelling: builtin::spelling(),
            punctuation: PunctuationConfig::default(),
            capitalization: CapitalizationConfig::default(),
            grammar: GrammarConfig::default(),
            sentence_split: SentenceSplitConfig::default(),
            structure: StructureConfig::default(),
            lexicon: LexiconConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl RuleBook {
    /// Load a rule book from a YAML file. Missing tables keep their built-in defaults.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule book: {path}"))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid rule book: {path}"))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let rules: RuleBook = serde_yaml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rule book with fallback to the built-in defaults
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!("Failed to load rule book from {p}, using defaults: {e:#}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject tables that would produce empty-trigger candidates.
    pub fn validate(&self) -> Result<()> {
        let tables: [(&str, &RuleTable); 15] = [
            ("power_verbs", &self.power_verbs),
            ("professional_verbs", &self.professional_verbs),
            ("weak_adjectives", &self.weak_adjectives),
            ("weak_phrases", &self.weak_phrases),
            ("passive_to_active", &self.passive_to_active),
            ("filler.phrases", &self.filler.phrases),
            ("executive_vocabulary", &self.executive_vocabulary),
            ("quantification.patterns", &self.quantification.patterns),
            ("skill_upgrades", &self.skill_upgrades),
            ("keyword_boosts.technical", &self.keyword_boosts.technical),
            ("keyword_boosts.business", &self.keyword_boosts.business),
            ("keyword_boosts.soft_skills", &self.keyword_boosts.soft_skills),
            ("spelling", &self.spelling),
            ("grammar.agreement", &self.grammar.agreement),
            ("grammar.tense_fixes", &self.grammar.tense_fixes),
        ];
        for (name, table) in tables {
            if let Some((key, _)) = table.iter().find(|(k, _)| k.trim().is_empty()) {
                anyhow::bail!("rule table {name} has an empty trigger key ({key:?})");
            }
        }
        if self.filler.words.iter().any(|w| w.trim().is_empty()) {
            anyhow::bail!("filler.words contains an empty entry");
        }
        for (name, industry) in &self.industry.industries {
            if industry.triggers.is_empty() {
                anyhow::bail!("industry {name} has no trigger terms");
            }
        }
        for (keyword, triggers) in &self.keyword_boosts.trending.keywords {
            if triggers.iter().all(|t| t.trim().is_empty()) {
                anyhow::bail!("trending keyword {keyword} has no trigger terms");
            }
        }
        if self.keyword_boosts.trending.injection_points.iter().any(|p| p.trim().is_empty()) {
            anyhow::bail!("keyword_boosts.trending.injection_points contains an empty entry");
        }
        Ok(())
    }

    /// Number of entries per table, for `show-rules` style summaries.
    pub fn table_sizes(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("power_verbs", self.power_verbs.len()),
            ("professional_verbs", self.professional_verbs.len()),
            ("weak_adjectives", self.weak_adjectives.len()),
            ("weak_phrases", self.weak_phrases.len()),
            ("passive_to_active", self.passive_to_active.len()),
            ("filler.words", self.filler.words.len()),
            ("filler.phrases", self.filler.phrases.len()),
            ("executive_vocabulary", self.executive_vocabulary.len()),
            ("quantification.patterns", self.quantification.patterns.len()),
            ("industry.industries", self.industry.industries.len()),
            ("industry.generic_terms", self.industry.generic_terms.len()),
            ("skill_upgrades", self.skill_upgrades.len()),
            ("keyword_boosts.technical", self.keyword_boosts.technical.len()),
            ("keyword_boosts.business", self.keyword_boosts.business.len()),
            ("keyword_boosts.soft_skills", self.keyword_boosts.soft_skills.len()),
            ("keyword_boosts.trending", self.keyword_boosts.trending.keywords.len()),
            ("spelling", self.spelling.len()),
            ("punctuation.spacing_fixes", self.punctuation.spacing_fixes.len()),
            ("capitalization.proper_nouns", self.capitalization.proper_nouns.len()),
            ("grammar.agreement", self.grammar.agreement.len()),
            ("grammar.tense_fixes", self.grammar.tense_fixes.len()),
            ("structure.section_headers", self.structure.section_headers.len()),
            ("sentence_split.connectors", self.sentence_split.connectors.len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
weak_phrases:
  responsible for: owned
sentence_split:
  max_words: 30
"#;
        let rules = RuleBook::from_yaml(yaml).unwrap();
        assert_eq!(rules.weak_phrases.len(), 1);
        assert_eq!(rules.weak_phrases["responsible for"], "owned");
        assert_eq!(rules.sentence_split.max_words, 30);
        assert_eq!(rules.sentence_split.min_words_before_split, 8);
        assert_eq!(rules.power_verbs, builtin::power_verbs());
        assert_eq!(rules.pipeline.generators.len(), STANDARD_GENERATORS.len());
    }

    #[test]
    fn test_empty_trigger_rejected() {
        let yaml = "spelling:\n  '': nothing\n";
        assert!(RuleBook::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let rules = RuleBook::default();
        let yaml = rules.to_yaml().unwrap();
        let reloaded = RuleBook::from_yaml(&yaml).unwrap();
        assert_eq!(reloaded.spelling, rules.spelling);
        assert_eq!(
            reloaded.punctuation.spacing_fixes,
            rules.punctuation.spacing_fixes
        );
        assert_eq!(reloaded.industry.industries.len(), rules.industry.industries.len());
    }

    #[test]
    fn test_pipeline_disable() {
        let mut pipeline = PipelineConfig::default();
        assert!(pipeline.disable("fillerwords"));
        assert!(!pipeline.disable("NoSuchGenerator"));
        assert!(!pipeline.enabled_names().any(|n| n == "FillerWords"));
        assert_eq!(pipeline.enabled_names().count(), STANDARD_GENERATORS.len() - 1);
    }

    #[test]
    fn test_trending_without_triggers_rejected() {
        let yaml = "keyword_boosts:\n  trending:\n    keywords:\n      remote work: ['']\n";
        assert!(RuleBook::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_partial_keyword_boosts_keep_other_tables() {
        let yaml = "keyword_boosts:\n  technical:\n    api: REST API design\n";
        let rules = RuleBook::from_yaml(yaml).unwrap();
        assert_eq!(rules.keyword_boosts.technical.len(), 1);
        assert_eq!(rules.keyword_boosts.business, builtin::business_boosts());
        assert_eq!(rules.keyword_boosts.trending.min_triggers, 2);
    }

    #[test]
    fn test_load_with_fallback_on_missing_file() {
        let rules = RuleBook::load_with_fallback(Some("/definitely/not/here.yaml"));
        assert_eq!(rules.spelling, builtin::spelling());
    }
}
