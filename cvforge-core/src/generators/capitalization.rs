use super::engine::{table_candidates, CandidateGenerator, GenerationContext};
use crate::error::GenerationError;
use crate::types::*;
use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?] (\p{Ll})").unwrap());

/// Sentence-start capitals, the pronoun "I", and product/company names.
pub struct CapitalizationGenerator;

/// The whitespace-delimited word ending at `punct_end`, punctuation included,
/// with any opening bracket or quote stripped: "(e.g." → "e.g.".
fn word_before(text: &str, punct_end: usize) -> &str {
    let head = &text[..punct_end];
    let start = head.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    head[start..].trim_start_matches(['(', '[', '"', '\'', '“'])
}

/// True when some standalone "i" reads as the pronoun and none is part of
/// an abbreviation like "i.e.".
fn has_lowercase_pronoun(text: &str) -> bool {
    let mut pronoun = false;
    for (start, _) in text.match_indices('i') {
        if !MatchBoundary::Word.accepts(text, start, start + 1) {
            continue;
        }
        match text[start + 1..].chars().next() {
            Some('.') => return false,
            None | Some(' ' | '\'' | '’' | ',' | ';' | '\n') => pronoun = true,
            _ => {}
        }
    }
    pronoun
}

impl CandidateGenerator for CapitalizationGenerator {
    fn name(&self) -> &'static str {
        "Capitalization"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let config = &ctx.rules.capitalization;
        let mut candidates = Vec::new();

        if config.sentence_start {
            for caps in SENTENCE_START_RE.captures_iter(text) {
                let (Some(whole), Some(letter)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                let preceding = word_before(text, whole.start() + 1);
                if config
                    .abbreviations
                    .iter()
                    .any(|abbr| abbr.eq_ignore_ascii_case(preceding))
                {
                    continue;
                }
                let replacement = format!(
                    "{}{}",
                    &text[whole.start()..letter.start()],
                    letter.as_str().to_uppercase()
                );
                candidates.push(ReplacementCandidate::new(whole.as_str(), replacement).at(whole.start()));
            }
        }

        if config.first_person_pronoun && has_lowercase_pronoun(text) {
            candidates.push(ReplacementCandidate::new("i", "I").whole_word());
        }

        candidates.extend(
            table_candidates(text, &config.proper_nouns, false, MatchBoundary::Word)
                .into_iter()
                .filter(|c| c.old_text != c.new_text),
        );
        Ok(candidates)
    }
}
