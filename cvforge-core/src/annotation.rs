//! Token/POS/lemma annotation.
//!
//! The improver holds one oracle handle for its whole lifetime and passes it
//! by reference; nothing here is global. `LexiconTagger` is the built-in
//! rule-based oracle driven by the rule book's verb and adjective tables.

use crate::config::RuleBook;
use crate::error::GenerationError;
use crate::types::{PartOfSpeech, Token};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Words with inner apostrophes/hyphens ("don't", "cross-functional")
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").expect("valid word regex")
});

/// Produces token annotations for one block of text.
pub trait AnnotationOracle: Send + Sync {
    fn name(&self) -> &str;

    fn annotate(&self, text: &str) -> Result<Vec<Token>, GenerationError>;
}

/// Oracle that never answers. Token-based generators degrade to nothing,
/// literal generators keep working.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableOracle;

impl AnnotationOracle for UnavailableOracle {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn annotate(&self, _text: &str) -> Result<Vec<Token>, GenerationError> {
        Err(GenerationError::OracleFailed(
            "no annotation model loaded".to_string(),
        ))
    }
}

/// Inflection a verb token carries relative to its lemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbForm {
    Base,
    Past,
    Gerund,
    ThirdPerson,
}

impl VerbForm {
    /// Infer the form from a surface/lemma pair produced by the tagger.
    pub fn of(surface: &str, lemma: &str) -> Self {
        let surface = surface.to_lowercase();
        if surface == lemma {
            Self::Base
        } else if surface.ends_with("ing") {
            Self::Gerund
        } else if surface.ends_with('s') && !surface.ends_with("ss") && surface.starts_with(
            lemma.trim_end_matches('y'),
        ) {
            Self::ThirdPerson
        } else {
            Self::Past
        }
    }
}

/// Rule-based tagger: word regex tokenizer, lexicon lookups for verbs and
/// adjectives, and a few positional heuristics for nouns.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    verbs: HashSet<String>,
    adjectives: HashSet<String>,
    irregular: HashMap<String, String>,
    determiners: HashSet<String>,
}

const SUBJECT_WORDS: &[&str] = &["i", "we", "you", "he", "she", "they", "who", "to", "will", "can", "could", "would", "should", "must", "and"];
const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ment", "ness", "ity", "ship", "ance", "ence", "ism", "ist"];

impl LexiconTagger {
    pub fn new(rules: &RuleBook) -> Self {
        let verbs = rules
            .power_verbs
            .keys()
            .chain(rules.professional_verbs.keys())
            .chain(rules.lexicon.verbs.iter())
            .chain(rules.lexicon.irregular_forms.values())
            .map(|v| v.to_lowercase())
            .collect();
        let adjectives = rules
            .weak_adjectives
            .keys()
            .chain(rules.lexicon.adjectives.iter())
            .map(|a| a.to_lowercase())
            .collect();
        Self {
            verbs,
            adjectives,
            irregular: rules
                .lexicon
                .irregular_forms
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
                .collect(),
            determiners: rules
                .lexicon
                .determiners
                .iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    /// Lemma of `word` if it is a known verb or an inflection of one.
    pub fn verb_lemma(&self, word: &str) -> Option<String> {
        if let Some(lemma) = self.irregular.get(word) {
            return Some(lemma.clone());
        }
        if self.verbs.contains(word) {
            return Some(word.to_string());
        }
        let mut candidates: Vec<String> = Vec::new();
        if let Some(stem) = word.strip_suffix("ied").or_else(|| word.strip_suffix("ies")) {
            candidates.push(format!("{stem}y"));
        }
        if let Some(stem) = word.strip_suffix("ed") {
            candidates.push(stem.to_string());
            candidates.push(format!("{stem}e"));
            candidates.extend(undouble(stem));
        }
        if let Some(stem) = word.strip_suffix("ing") {
            candidates.push(stem.to_string());
            candidates.push(format!("{stem}e"));
            candidates.extend(undouble(stem));
            if let Some(s) = stem.strip_suffix('y') {
                candidates.push(format!("{s}ie"));
            }
        }
        if let Some(stem) = word.strip_suffix("es") {
            candidates.push(stem.to_string());
        }
        if let Some(stem) = word.strip_suffix('s') {
            if !stem.ends_with('s') {
                candidates.push(stem.to_string());
            }
        }
        candidates.into_iter().find(|c| self.verbs.contains(c))
    }

    /// Lemma of `word` if it is a known adjective or its comparative/superlative.
    pub fn adjective_lemma(&self, word: &str) -> Option<String> {
        if self.adjectives.contains(word) {
            return Some(word.to_string());
        }
        let mut candidates: Vec<String> = Vec::new();
        for suffix in ["est", "er"] {
            if let Some(stem) = word.strip_suffix(suffix) {
                if let Some(s) = stem.strip_suffix('i') {
                    candidates.push(format!("{s}y"));
                }
                candidates.push(stem.to_string());
                candidates.push(format!("{stem}e"));
                candidates.extend(undouble(stem));
            }
        }
        candidates.into_iter().find(|c| self.adjectives.contains(c))
    }

    fn tag(&self, word: &str, prev: Option<&str>, sentence_start: bool) -> (PartOfSpeech, String) {
        let after_determiner = prev.is_some_and(|p| self.determiners.contains(p));
        let after_subject = prev.is_some_and(|p| SUBJECT_WORDS.contains(&p));
        let adjective = self.adjective_lemma(word);
        let verb = self.verb_lemma(word);

        if after_determiner {
            if let Some(lemma) = adjective {
                return (PartOfSpeech::Adj, lemma);
            }
            return (PartOfSpeech::Noun, noun_lemma(word));
        }
        if let Some(lemma) = &verb {
            if sentence_start || after_subject {
                return (PartOfSpeech::Verb, lemma.clone());
            }
        }
        if let Some(lemma) = adjective {
            return (PartOfSpeech::Adj, lemma);
        }
        if let Some(lemma) = verb {
            return (PartOfSpeech::Verb, lemma);
        }
        if NOUN_SUFFIXES.iter().any(|s| word.len() > s.len() + 2 && word.ends_with(s)) {
            return (PartOfSpeech::Noun, noun_lemma(word));
        }
        (PartOfSpeech::Other, word.to_string())
    }
}

fn undouble(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && bytes[n - 1].is_ascii_alphabetic() {
        Some(stem[..n - 1].to_string())
    } else {
        None
    }
}

fn noun_lemma(word: &str) -> String {
    match word.strip_suffix('s') {
        Some(stem) if !stem.ends_with('s') && stem.len() > 2 => stem.to_string(),
        _ => word.to_string(),
    }
}

fn starts_sentence(gap: &str) -> bool {
    gap.chars()
        .any(|c| matches!(c, '.' | '!' | '?' | '\n' | '•' | '·' | '*' | ':' | ';'))
        || gap.trim_start().starts_with('-')
}

impl AnnotationOracle for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn annotate(&self, text: &str) -> Result<Vec<Token>, GenerationError> {
        let mut tokens: Vec<Token> = Vec::new();
        let mut prev_end = 0;
        let mut prev_word: Option<String> = None;

        for m in WORD_RE.find_iter(text) {
            let surface = m.as_str();
            let lower = surface.to_lowercase();
            let sentence_start = prev_word.is_none() || starts_sentence(&text[prev_end..m.start()]);
            let prev = if sentence_start { None } else { prev_word.as_deref() };
            let (pos, lemma) = self.tag(&lower, prev, sentence_start);

            tokens.push(Token {
                surface: surface.to_string(),
                start: m.start(),
                end: m.end(),
                pos,
                lemma,
            });
            prev_end = m.end();
            prev_word = Some(lower);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> LexiconTagger {
        LexiconTagger::new(&RuleBook::default())
    }

    fn find<'a>(tokens: &'a [Token], surface: &str) -> &'a Token {
        tokens.iter().find(|t| t.surface == surface).unwrap()
    }

    #[test]
    fn test_offsets_match_surface() {
        let text = "Managed café rollout, cross-functional team";
        let tokens = tagger().annotate(text).unwrap();
        assert_eq!(tokens.len(), 5);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.surface);
        }
        assert_eq!(tokens[3].surface, "cross-functional");
    }

    #[test]
    fn test_verb_lemmas() {
        let tagger = tagger();
        assert_eq!(tagger.verb_lemma("helped").as_deref(), Some("help"));
        assert_eq!(tagger.verb_lemma("managed").as_deref(), Some("manage"));
        assert_eq!(tagger.verb_lemma("stopped").as_deref(), Some("stop"));
        assert_eq!(tagger.verb_lemma("studied").as_deref(), Some("study"));
        assert_eq!(tagger.verb_lemma("led").as_deref(), Some("lead"));
        assert_eq!(tagger.verb_lemma("working").as_deref(), Some("work"));
        assert_eq!(tagger.verb_lemma("workflow"), None);
    }

    #[test]
    fn test_pos_heuristics() {
        let tokens = tagger()
            .annotate("I worked on the work with a good team. Helped clients")
            .unwrap();
        assert_eq!(find(&tokens, "worked").pos, PartOfSpeech::Verb);
        assert_eq!(find(&tokens, "worked").lemma, "work");
        assert_eq!(find(&tokens, "work").pos, PartOfSpeech::Noun);
        assert_eq!(find(&tokens, "good").pos, PartOfSpeech::Adj);
        assert_eq!(find(&tokens, "Helped").pos, PartOfSpeech::Verb);
        assert_eq!(find(&tokens, "Helped").lemma, "help");
    }

    #[test]
    fn test_comparative_adjective() {
        assert_eq!(tagger().adjective_lemma("bigger").as_deref(), Some("big"));
        assert_eq!(tagger().adjective_lemma("easier").as_deref(), Some("easy"));
    }

    #[test]
    fn test_verb_form() {
        assert_eq!(VerbForm::of("Helped", "help"), VerbForm::Past);
        assert_eq!(VerbForm::of("led", "lead"), VerbForm::Past);
        assert_eq!(VerbForm::of("helping", "help"), VerbForm::Gerund);
        assert_eq!(VerbForm::of("helps", "help"), VerbForm::ThirdPerson);
        assert_eq!(VerbForm::of("tries", "try"), VerbForm::ThirdPerson);
        assert_eq!(VerbForm::of("help", "help"), VerbForm::Base);
    }

    #[test]
    fn test_empty_text_and_unavailable_oracle() {
        assert!(tagger().annotate("").unwrap().is_empty());
        assert!(matches!(
            UnavailableOracle.annotate("text"),
            Err(GenerationError::OracleFailed(_))
        ));
    }
}
