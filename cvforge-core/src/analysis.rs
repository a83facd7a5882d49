//! Four-dimension résumé scoring: grammar/spelling, clarity/structure,
//! language strength and keyword usage.
//!
//! Scores are deliberately lenient: each dimension has a floor, and the
//! weighted total gets a 10% boost capped at 100.

use crate::annotation::AnnotationOracle;
use crate::config::RuleBook;
use crate::error::AnalysisError;
use crate::generators::sentence_split::sentences;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[•·\-\*][ \t]+(.+)$").unwrap());
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Z][A-Z \t]{2,}|.+:)[ \t]*$").unwrap());
static ALPHA_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{L}+").unwrap());

const COMPLEX_SENTENCE_WORDS: usize = 20;
const MIN_SECTIONS: usize = 3;
const REPEATED_WORD_MIN: usize = 4;
const MAX_EXAMPLES: usize = 5;

// Component weights for the overall score
const GRAMMAR_WEIGHT: f64 = 0.25;
const CLARITY_WEIGHT: f64 = 0.25;
const LANGUAGE_WEIGHT: f64 = 0.30;
const KEYWORD_WEIGHT: f64 = 0.20;

#[derive(Debug, Clone, Serialize)]
pub struct Misspelling {
    pub word: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrammarAnalysis {
    /// Sentences not ending in `. ! ? :`
    pub unterminated_sentences: Vec<String>,
    pub misspellings: Vec<Misspelling>,
    pub grammar_error_count: usize,
    pub spelling_error_count: usize,
    pub grammar_error_rate: f64,
    pub spelling_error_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClarityAnalysis {
    pub avg_sentence_length: f64,
    pub complex_sentence_count: usize,
    pub complex_sentences: Vec<String>,
    pub bullet_point_count: usize,
    pub paragraph_count: usize,
    pub repeated_words: BTreeMap<String, usize>,
    pub headings: Vec<String>,
    pub has_clear_sections: bool,
    pub has_bullet_points: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageAnalysis {
    pub weak_terms: Vec<String>,
    pub weak_terms_count: usize,
    pub action_verbs: Vec<String>,
    pub action_verbs_count: usize,
    pub weak_words_ratio: f64,
    pub action_verbs_ratio: f64,
    /// In [0.5, 1.0]
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub found: BTreeMap<String, Vec<String>>,
    pub total_unique_keywords: usize,
    pub keyword_density: f64,
}

/// Per-dimension scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComponentScores {
    pub grammar_spelling: f64,
    pub clarity_structure: f64,
    pub language_strength: f64,
    pub keyword_usage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub grammar: GrammarAnalysis,
    pub clarity: ClarityAnalysis,
    pub language: LanguageAnalysis,
    pub keywords: KeywordAnalysis,
    pub component_scores: ComponentScores,
    /// 0-100, one decimal
    pub overall_score: f64,
}

/// Score `text` along all four dimensions.
pub fn analyze(
    text: &str,
    rules: &RuleBook,
    oracle: &dyn AnnotationOracle,
) -> Result<AnalysisReport, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyText);
    }

    let words = ResumeAnalytics::words(text, oracle);
    let grammar = ResumeAnalytics::grammar_spelling(text, &words, rules);
    let clarity = ResumeAnalytics::clarity_structure(text, &words, rules);
    let language = ResumeAnalytics::language_strength(text, &words, rules);
    let keywords = ResumeAnalytics::keyword_usage(text, rules);

    let component_scores = ResumeAnalytics::component_scores(&grammar, &clarity, &language, &keywords);
    let overall_score = ResumeAnalytics::overall_score(&component_scores);
    tracing::debug!(overall_score, "analysis complete");

    Ok(AnalysisReport {
        grammar,
        clarity,
        language,
        keywords,
        component_scores,
        overall_score,
    })
}

/// Scoring steps, each computable on its own.
pub struct ResumeAnalytics;

impl ResumeAnalytics {
    /// Lowercased alphabetic words. Uses the oracle's tokenization when it
    /// answers, a plain letter regex otherwise.
    pub fn words(text: &str, oracle: &dyn AnnotationOracle) -> Vec<String> {
        match oracle.annotate(text) {
            Ok(tokens) => tokens
                .into_iter()
                .filter(|t| t.surface.chars().all(char::is_alphabetic))
                .map(|t| t.surface.to_lowercase())
                .collect(),
            Err(err) => {
                tracing::debug!("oracle {} unavailable for analysis: {err}", oracle.name());
                ALPHA_WORD_RE
                    .find_iter(text)
                    .map(|m| m.as_str().to_lowercase())
                    .collect()
            }
        }
    }

    pub fn grammar_spelling(text: &str, words: &[String], rules: &RuleBook) -> GrammarAnalysis {
        let unterminated_sentences: Vec<String> = sentences(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.ends_with(['.', '!', '?', ':']))
            .map(str::to_string)
            .collect();

        let misspellings: Vec<Misspelling> = words
            .iter()
            .filter_map(|w| {
                rules.spelling.get(w).map(|suggestion| Misspelling {
                    word: w.clone(),
                    suggestion: suggestion.clone(),
                })
            })
            .collect();

        // Unterminated lines are mostly headers and bullets, so they are
        // reported but not counted against the grammar rate.
        let spelling_error_rate = if words.is_empty() {
            0.0
        } else {
            misspellings.len() as f64 / words.len() as f64
        };

        GrammarAnalysis {
            grammar_error_count: unterminated_sentences.len(),
            spelling_error_count: misspellings.len(),
            unterminated_sentences,
            misspellings,
            grammar_error_rate: 0.0,
            spelling_error_rate,
        }
    }

    pub fn clarity_structure(text: &str, words: &[String], rules: &RuleBook) -> ClarityAnalysis {
        let sentence_list: Vec<&str> = sentences(text).into_iter().map(str::trim).collect();
        let lengths: Vec<usize> = sentence_list
            .iter()
            .map(|s| s.split_whitespace().count())
            .collect();
        let avg_sentence_length = if lengths.is_empty() {
            0.0
        } else {
            lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
        };

        let complex: Vec<String> = sentence_list
            .iter()
            .filter(|s| s.split_whitespace().count() > COMPLEX_SENTENCE_WORDS)
            .map(|s| s.to_string())
            .collect();

        let bullet_point_count = Self::bullet_count(text);
        let paragraph_count = text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count();

        let stop_words: HashSet<&str> = rules.analysis.stop_words.iter().map(String::as_str).collect();
        let mut frequencies: BTreeMap<String, usize> = BTreeMap::new();
        for word in words {
            *frequencies.entry(word.clone()).or_default() += 1;
        }
        let repeated_words = frequencies
            .into_iter()
            .filter(|(w, count)| *count >= REPEATED_WORD_MIN && !stop_words.contains(w.as_str()))
            .collect();

        let headings = Self::headings(text);

        ClarityAnalysis {
            avg_sentence_length,
            complex_sentence_count: complex.len(),
            complex_sentences: complex.into_iter().take(MAX_EXAMPLES).collect(),
            bullet_point_count,
            paragraph_count,
            repeated_words,
            has_clear_sections: headings.len() >= MIN_SECTIONS,
            has_bullet_points: bullet_point_count > 0,
            headings,
        }
    }

    /// Lines that start with a bullet marker.
    pub fn bullet_count(text: &str) -> usize {
        BULLET_RE.find_iter(text).count()
    }

    /// All-caps lines and lines ending in a colon.
    pub fn headings(text: &str) -> Vec<String> {
        HEADING_RE
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    }

    pub fn has_clear_sections(text: &str) -> bool {
        Self::headings(text).len() >= MIN_SECTIONS
    }

    pub fn language_strength(text: &str, words: &[String], rules: &RuleBook) -> LanguageAnalysis {
        let weak: HashSet<&str> = rules.analysis.weak_words.iter().map(String::as_str).collect();
        let action: HashSet<&str> = rules.analysis.action_verbs.iter().map(String::as_str).collect();
        let lower = text.to_lowercase();

        let mut weak_found: Vec<String> = words
            .iter()
            .filter(|w| weak.contains(w.as_str()))
            .cloned()
            .collect();
        weak_found.extend(
            rules
                .analysis
                .weak_words
                .iter()
                .filter(|p| p.contains(' ') && lower.contains(p.as_str()))
                .cloned(),
        );
        let action_found: Vec<&String> = words.iter().filter(|w| action.contains(w.as_str())).collect();

        let (weak_words_ratio, action_verbs_ratio) = if words.is_empty() {
            (0.0, 0.0)
        } else {
            (
                weak_found.len() as f64 / words.len() as f64,
                action_found.len() as f64 / words.len() as f64,
            )
        };
        let score = Self::language_score(weak_words_ratio, action_verbs_ratio);

        let action_unique: BTreeSet<String> = action_found.into_iter().cloned().collect();
        LanguageAnalysis {
            weak_terms_count: weak_found.len(),
            weak_terms: weak_found.into_iter().collect::<BTreeSet<_>>().into_iter().collect(),
            action_verbs_count: action_unique.len(),
            action_verbs: action_unique.into_iter().collect(),
            weak_words_ratio,
            action_verbs_ratio,
            score,
        }
    }

    /// Base 0.70, weak-term penalty up to 0.3, action-verb bonus up to 0.3,
    /// clamped to [0.5, 1.0].
    pub fn language_score(weak_ratio: f64, action_ratio: f64) -> f64 {
        let penalty = (weak_ratio * 0.5).min(0.3);
        let bonus = (action_ratio * 2.0).min(0.3);
        (0.70 - penalty + bonus).clamp(0.5, 1.0)
    }

    pub fn keyword_usage(text: &str, rules: &RuleBook) -> KeywordAnalysis {
        let lower = text.to_lowercase();
        let found: BTreeMap<String, Vec<String>> = rules
            .analysis
            .keyword_catalogue
            .iter()
            .map(|(category, keywords)| {
                let hits = keywords
                    .iter()
                    .filter(|k| lower.contains(k.to_lowercase().as_str()))
                    .cloned()
                    .collect();
                (category.clone(), hits)
            })
            .collect();
        let unique: BTreeSet<&String> = found.values().flatten().collect();
        let word_count = text.split_whitespace().count();
        KeywordAnalysis {
            total_unique_keywords: unique.len(),
            keyword_density: if word_count == 0 {
                0.0
            } else {
                unique.len() as f64 / word_count as f64
            },
            found,
        }
    }

    pub fn component_scores(
        grammar: &GrammarAnalysis,
        clarity: &ClarityAnalysis,
        language: &LanguageAnalysis,
        keywords: &KeywordAnalysis,
    ) -> ComponentScores {
        // error rates at which a sub-score reaches zero
        let grammar_score = (1.0 - grammar.grammar_error_rate / 0.5).max(0.0);
        let spelling_score = (1.0 - grammar.spelling_error_rate / 0.1).max(0.0);

        let avg = clarity.avg_sentence_length;
        let sentence_length_score = if (8.0..=20.0).contains(&avg) {
            1.0
        } else {
            (1.0 - ((avg - 14.0).abs() / 20.0).min(1.0)).max(0.6)
        };
        let structure_score = ((if clarity.has_clear_sections { 1.0 } else { 0.75 }) * 0.4
            + (if clarity.has_bullet_points { 1.0 } else { 0.70 }) * 0.3
            + sentence_length_score * 0.3)
            .max(0.60);

        let density = keywords.keyword_density;
        let density_score = if (0.01..=0.08).contains(&density) {
            1.0
        } else {
            (1.0 - ((density - 0.04).abs() / 0.08).min(1.0)).max(0.6)
        };
        let count_score = (keywords.total_unique_keywords as f64 / 8.0).clamp(0.5, 1.0);
        let keyword_score = (density_score * 0.4 + count_score * 0.6).max(0.55);

        ComponentScores {
            grammar_spelling: (grammar_score * 0.5 + spelling_score * 0.5) * 100.0,
            clarity_structure: structure_score * 100.0,
            language_strength: language.score * 100.0,
            keyword_usage: keyword_score * 100.0,
        }
    }

    pub fn overall_score(scores: &ComponentScores) -> f64 {
        let weighted = scores.grammar_spelling * GRAMMAR_WEIGHT
            + scores.clarity_structure * CLARITY_WEIGHT
            + scores.language_strength * LANGUAGE_WEIGHT
            + scores.keyword_usage * KEYWORD_WEIGHT;
        let boosted = (weighted * 1.1).min(100.0);
        (boosted * 10.0).round() / 10.0
    }
}
