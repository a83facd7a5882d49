use crate::annotation::VerbForm;
use crate::config::{PipelineConfig, RuleBook, RuleTable};
use crate::error::GenerationError;
use crate::rewrite::GeneratorOutput;
use crate::types::*;
use regex::Regex;
use std::time::Instant;

use super::adjectives::WeakAdjectiveGenerator;
use super::capitalization::CapitalizationGenerator;
use super::filler::FillerWordGenerator;
use super::grammar::{ArticleUsageGenerator, SubjectVerbAgreementGenerator, VerbTenseGenerator};
use super::industry::IndustryKeywordGenerator;
use super::keywords::{
    BusinessKeywordGenerator, SoftSkillKeywordGenerator, TechnicalKeywordGenerator,
    TrendingKeywordGenerator,
};
use super::phrases::{PassiveVoiceGenerator, SkillUpgradeGenerator, WeakPhraseGenerator};
use super::punctuation::PunctuationGenerator;
use super::quantification::QuantificationGenerator;
use super::sentence_split::SentenceSplitGenerator;
use super::spelling::SpellingGenerator;
use super::structure::StructureGenerator;
use super::verbs::{PowerVerbGenerator, ProfessionalVerbGenerator};
use super::vocabulary::VocabularyGenerator;

/// Everything a generator may read while scanning one block.
///
/// All fields are shared borrows of one immutable snapshot; generators can
/// never observe another generator's output.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub block: &'a TextBlock,
    /// `None` when the annotation oracle failed for this block
    pub tokens: Option<&'a [Token]>,
    /// Whole-document text (blocks joined with `\n`), for document-level gates
    pub document_text: &'a str,
    pub rules: &'a RuleBook,
}

impl<'a> GenerationContext<'a> {
    pub fn text(&self) -> &'a str {
        &self.block.text
    }

    pub fn tokens(&self) -> Result<&'a [Token], GenerationError> {
        self.tokens.ok_or(GenerationError::AnnotationUnavailable)
    }
}

/// A candidate generator scans one block against one rule table.
///
/// Implementations must be pure: no mutation of the block, no state kept
/// between calls.
pub trait CandidateGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<ReplacementCandidate>, GenerationError>;
}

// Debug configuration for candidate tracing
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
    pub enabled: bool,
    filters: Vec<CandidateFilter>,
}

/// A `--debug-filter` pattern, compiled once. Patterns that are not valid
/// regexes match as plain substrings of `old_text`.
#[derive(Debug, Clone)]
enum CandidateFilter {
    Regex(Regex),
    Substring(String),
}

impl CandidateFilter {
    fn compile(pattern: String) -> Self {
        match Regex::new(&pattern) {
            Ok(regex) => Self::Regex(regex),
            Err(e) => {
                tracing::debug!("Debug filter {pattern:?} is not a regex ({e}); matching as text");
                Self::Substring(pattern)
            }
        }
    }

    fn matches(&self, candidate: &ReplacementCandidate) -> bool {
        match self {
            Self::Regex(regex) => {
                regex.is_match(&candidate.old_text) || regex.is_match(&candidate.new_text)
            }
            Self::Substring(text) => candidate.old_text.contains(text.as_str()),
        }
    }
}

impl DebugConfig {
    pub fn new(enabled: bool, filter_patterns: Vec<String>) -> Self {
        Self {
            enabled,
            filters: filter_patterns.into_iter().map(CandidateFilter::compile).collect(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    fn matches(&self, candidate: &ReplacementCandidate) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|f| f.matches(candidate))
    }
}

/// Trace the candidates one generator produced for one block.
pub fn debug_candidates(
    generator: &str,
    block: &TextBlock,
    candidates: &[ReplacementCandidate],
    debug_config: &DebugConfig,
) {
    if !debug_config.enabled {
        return;
    }
    let matching: Vec<_> = candidates
        .iter()
        .filter(|c| debug_config.matches(c))
        .collect();
    if matching.is_empty() {
        return;
    }
    tracing::debug!(
        generator,
        block = block.index,
        "{} matching candidates",
        matching.len()
    );
    for candidate in matching {
        tracing::debug!(generator, block = block.index, "  {candidate}");
    }
}

/// Ordered set of generators. Registration order is the tie-break key for
/// candidates covering the same span.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn CandidateGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in generator in default order.
    pub fn standard() -> Self {
        Self::from_pipeline(&PipelineConfig::default())
    }

    /// Build the registry from the rule book's pipeline section. Disabled
    /// entries are skipped; unknown names are skipped with a warning.
    pub fn from_pipeline(pipeline: &PipelineConfig) -> Self {
        let mut registry = Self::new();
        for entry in &pipeline.generators {
            if !entry.enabled {
                tracing::debug!("Skipping disabled generator: {}", entry.name);
                continue;
            }
            match generator_by_name(&entry.name) {
                Some(generator) => {
                    registry.register(generator);
                }
                None => tracing::warn!("Unknown generator: {}. Skipping...", entry.name),
            }
        }
        registry
    }

    pub fn register(&mut self, generator: Box<dyn CandidateGenerator>) -> &mut Self {
        self.generators.push(generator);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Run every generator against one context, in registration order.
    /// Each output carries the time its generator took.
    pub fn run(&self, ctx: &GenerationContext<'_>, debug_config: &DebugConfig) -> Vec<GeneratorOutput> {
        self.generators
            .iter()
            .map(|generator| {
                let start = Instant::now();
                let result = generator.generate(ctx);
                let elapsed = start.elapsed();
                if let Ok(candidates) = &result {
                    debug_candidates(generator.name(), ctx.block, candidates, debug_config);
                }
                GeneratorOutput::new(generator.name(), result).timed(elapsed)
            })
            .collect()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

pub fn generator_by_name(name: &str) -> Option<Box<dyn CandidateGenerator>> {
    let generator: Box<dyn CandidateGenerator> = match name {
        "WeakPhrases" => Box::new(WeakPhraseGenerator),
        "PassiveVoice" => Box::new(PassiveVoiceGenerator),
        "PowerVerbs" => Box::new(PowerVerbGenerator),
        "ProfessionalVerbs" => Box::new(ProfessionalVerbGenerator),
        "WeakAdjectives" => Box::new(WeakAdjectiveGenerator),
        "ExecutiveVocabulary" => Box::new(VocabularyGenerator),
        "FillerWords" => Box::new(FillerWordGenerator),
        "Quantification" => Box::new(QuantificationGenerator),
        "IndustryKeywords" => Box::new(IndustryKeywordGenerator),
        "SkillUpgrades" => Box::new(SkillUpgradeGenerator),
        "TechnicalKeywords" => Box::new(TechnicalKeywordGenerator),
        "BusinessKeywords" => Box::new(BusinessKeywordGenerator),
        "SoftSkillKeywords" => Box::new(SoftSkillKeywordGenerator),
        "TrendingKeywords" => Box::new(TrendingKeywordGenerator),
        "Spelling" => Box::new(SpellingGenerator),
        "Punctuation" => Box::new(PunctuationGenerator),
        "Capitalization" => Box::new(CapitalizationGenerator),
        "VerbTense" => Box::new(VerbTenseGenerator),
        "ArticleUsage" => Box::new(ArticleUsageGenerator),
        "SubjectVerbAgreement" => Box::new(SubjectVerbAgreementGenerator),
        "SentenceSplit" => Box::new(SentenceSplitGenerator),
        "Structure" => Box::new(StructureGenerator),
        _ => return None,
    };
    Some(generator)
}

// ===== CASE HELPERS =====

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// At least two letters and no lowercase ones.
pub fn is_all_upper(s: &str) -> bool {
    s.chars().filter(|c| c.is_alphabetic()).count() > 1 && !s.chars().any(char::is_lowercase)
}

/// Carry the casing of `surface` over to `replacement`.
pub fn match_case(surface: &str, replacement: &str) -> String {
    if is_all_upper(surface) {
        replacement.to_uppercase()
    } else if surface.chars().next().is_some_and(char::is_uppercase) {
        capitalize_first(replacement)
    } else {
        replacement.to_string()
    }
}

/// lower / Capitalized / Title (/ UPPER) variants of a lowercase trigger,
/// each paired with the correspondingly cased replacement.
pub fn case_variants(trigger: &str, replacement: &str, include_upper: bool) -> Vec<(String, String)> {
    let mut variants: Vec<String> = vec![
        trigger.to_string(),
        capitalize_first(trigger),
        title_case(trigger),
    ];
    if include_upper {
        variants.push(trigger.to_uppercase());
    }
    let mut out: Vec<(String, String)> = Vec::new();
    for variant in variants {
        if out.iter().any(|(v, _)| *v == variant) {
            continue;
        }
        let cased = match_case(&variant, replacement);
        out.push((variant, cased));
    }
    out
}

/// Literal table scan: every case variant of every key that occurs in `text`.
pub fn table_candidates(
    text: &str,
    table: &RuleTable,
    include_upper: bool,
    boundary: MatchBoundary,
) -> Vec<ReplacementCandidate> {
    let lower = text.to_lowercase();
    let mut candidates = Vec::new();
    for (trigger, replacement) in table {
        if !lower.contains(trigger.to_lowercase().as_str()) {
            continue;
        }
        for (variant, cased) in case_variants(trigger, replacement, include_upper) {
            if let Some(offset) = first_occurrence(text, &variant, boundary) {
                let mut candidate = ReplacementCandidate::new(variant, cased).at(offset);
                candidate.boundary = boundary;
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// First occurrence of `needle` in `text` that satisfies `boundary`.
pub fn first_occurrence(text: &str, needle: &str, boundary: MatchBoundary) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    text.match_indices(needle)
        .map(|(start, _)| start)
        .find(|&start| boundary.accepts(text, start, start + needle.len()))
}

/// Whether the lowercased `document` mentions `term`. Terms of one or two
/// letters ("ai") must stand alone; longer terms match inside other words,
/// so "ecosystem" mentions "system".
pub fn mentions(document_lower: &str, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return false;
    }
    if term.chars().count() <= 2 {
        first_occurrence(document_lower, &term, MatchBoundary::Word).is_some()
    } else {
        document_lower.contains(term.as_str())
    }
}

/// Number of distinct `terms` the lowercased document mentions.
pub fn distinct_mentions(document_lower: &str, terms: &[String]) -> usize {
    let mut seen: Vec<String> = Vec::new();
    for term in terms {
        let key = term.trim().to_lowercase();
        if !seen.contains(&key) && mentions(document_lower, &key) {
            seen.push(key);
        }
    }
    seen.len()
}

/// Lines of `text` with the byte offset at which each starts.
pub fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line)
    })
}

// ===== INFLECTION =====

const IRREGULAR_PAST: &[(&str, &str)] = &[
    ("build", "built"),
    ("lead", "led"),
    ("oversee", "oversaw"),
    ("understand", "understood"),
    ("undertake", "undertook"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn inflect_word(word: &str, form: VerbForm) -> String {
    match form {
        VerbForm::Base => word.to_string(),
        VerbForm::Past => {
            if let Some((_, past)) = IRREGULAR_PAST.iter().find(|(base, _)| *base == word) {
                return past.to_string();
            }
            if word.ends_with('e') {
                format!("{word}d")
            } else if let Some(stem) = consonant_y_stem(word) {
                format!("{stem}ied")
            } else {
                format!("{word}ed")
            }
        }
        VerbForm::Gerund => {
            if let Some(stem) = word.strip_suffix("ie") {
                format!("{stem}ying")
            } else if word.ends_with('e') && !word.ends_with("ee") && word.len() > 2 {
                format!("{}ing", &word[..word.len() - 1])
            } else {
                format!("{word}ing")
            }
        }
        VerbForm::ThirdPerson => {
            if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
                format!("{word}es")
            } else if let Some(stem) = consonant_y_stem(word) {
                format!("{stem}ies")
            } else {
                format!("{word}s")
            }
        }
    }
}

fn consonant_y_stem(word: &str) -> Option<&str> {
    let stem = word.strip_suffix('y')?;
    match stem.chars().next_back() {
        Some(c) if !is_vowel(c) => Some(stem),
        _ => None,
    }
}

/// Put a replacement verb phrase into `form`. Leading adverbs ("strategically
/// pursue") are skipped; the first other word carries the inflection.
pub fn inflect(phrase: &str, form: VerbForm) -> String {
    let words: Vec<&str> = phrase.split(' ').collect();
    let head = words
        .iter()
        .position(|w| !(w.ends_with("ly") && w.len() > 4))
        .unwrap_or(0);
    words
        .iter()
        .enumerate()
        .map(|(i, w)| if i == head { inflect_word(w, form) } else { w.to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STANDARD_GENERATORS;

    #[test]
    fn test_case_variants() {
        let variants = case_variants("responsible for", "spearheaded", true);
        assert_eq!(
            variants,
            vec![
                ("responsible for".to_string(), "spearheaded".to_string()),
                ("Responsible for".to_string(), "Spearheaded".to_string()),
                ("Responsible For".to_string(), "Spearheaded".to_string()),
                ("RESPONSIBLE FOR".to_string(), "SPEARHEADED".to_string()),
            ]
        );
        // single word: Capitalized and Title coincide
        assert_eq!(case_variants("good", "exceptional", false).len(), 2);
    }

    #[test]
    fn test_inflect() {
        assert_eq!(inflect("facilitate", VerbForm::Past), "facilitated");
        assert_eq!(inflect("support", VerbForm::Past), "supported");
        assert_eq!(inflect("identify", VerbForm::Past), "identified");
        assert_eq!(inflect("understand", VerbForm::Past), "understood");
        assert_eq!(inflect("strategically pursue", VerbForm::Past), "strategically pursued");
        assert_eq!(inflect("manage", VerbForm::Gerund), "managing");
        assert_eq!(inflect("encounter challenges", VerbForm::Gerund), "encountering challenges");
        assert_eq!(inflect("identify", VerbForm::ThirdPerson), "identifies");
        assert_eq!(inflect("establish", VerbForm::ThirdPerson), "establishes");
        assert_eq!(inflect("deploy", VerbForm::Past), "deployed");
    }

    #[test]
    fn test_first_occurrence_respects_boundary() {
        let text = "scheduled and led";
        assert_eq!(first_occurrence(text, "led", MatchBoundary::Literal), Some(6));
        assert_eq!(first_occurrence(text, "led", MatchBoundary::Word), Some(14));
        assert_eq!(first_occurrence(text, "", MatchBoundary::Literal), None);
    }

    #[test]
    fn test_debug_filters_compile_once() {
        let config = DebugConfig::new(true, vec!["^resp".to_string(), "[unclosed".to_string()]);
        assert_eq!(config.filter_count(), 2);
        assert!(matches!(config.filters[0], CandidateFilter::Regex(_)));
        assert!(matches!(config.filters[1], CandidateFilter::Substring(_)));

        assert!(config.matches(&ReplacementCandidate::new("responsible for", "led")));
        assert!(config.matches(&ReplacementCandidate::new("a [unclosed bracket", "b")));
        assert!(!config.matches(&ReplacementCandidate::new("helped", "facilitated")));
        // regex filters also look at the replacement side
        assert!(config.matches(&ReplacementCandidate::new("ran", "responsible")));
    }

    #[test]
    fn test_debug_without_filters_matches_everything() {
        let config = DebugConfig::new(true, Vec::new());
        assert!(config.matches(&ReplacementCandidate::new("x", "y")));
        assert_eq!(DebugConfig::disabled().filter_count(), 0);
    }

    #[test]
    fn test_mentions() {
        assert!(mentions("managed the partner ecosystem", "system"));
        assert!(mentions("barcode scanners", "Code"));
        assert!(mentions("applied ai to triage", "AI"));
        assert!(!mentions("maintained servers", "ai"));
        assert!(!mentions("anything", "  "));
        let terms = vec!["system".to_string(), "System".to_string(), "code".to_string()];
        assert_eq!(distinct_mentions("system code", &terms), 2);
    }

    #[test]
    fn test_lines_with_offsets() {
        let lines: Vec<_> = lines_with_offsets("ab\n\ncd").collect();
        assert_eq!(lines, vec![(0, "ab"), (3, ""), (4, "cd")]);
    }

    #[test]
    fn test_every_standard_name_resolves() {
        for name in STANDARD_GENERATORS {
            let generator = generator_by_name(name).expect("standard generator");
            assert_eq!(generator.name(), *name);
        }
    }

    #[test]
    fn test_standard_registry_order() {
        let registry = GeneratorRegistry::standard();
        assert_eq!(registry.names(), STANDARD_GENERATORS.to_vec());
    }

    #[test]
    fn test_registry_skips_disabled_and_unknown() {
        let mut pipeline = PipelineConfig::default();
        pipeline.disable("Spelling");
        pipeline.generators.push(crate::config::GeneratorConfig {
            name: "Telepathy".to_string(),
            enabled: true,
        });
        let registry = GeneratorRegistry::from_pipeline(&pipeline);
        assert_eq!(registry.len(), STANDARD_GENERATORS.len() - 1);
        assert!(!registry.names().contains(&"Spelling"));
    }
}
