use super::engine::{capitalize_first, CandidateGenerator, GenerationContext};
use crate::config::SentenceSplitConfig;
use crate::error::GenerationError;
use crate::types::*;

/// Splits overlong sentences at a connector.
///
/// The candidate covers only the seam ("sales, and reduced") so edits
/// elsewhere in the sentence are not shadowed by it.
pub struct SentenceSplitGenerator;

/// Sentence slices of `text`: split after `.`/`!`/`?` followed by
/// whitespace, and at line breaks.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let boundary = match c {
            '\n' => Some(i),
            '.' | '!' | '?' => match chars.peek() {
                Some((_, next)) if next.is_whitespace() => Some(i + 1),
                None => Some(i + 1),
                _ => None,
            },
            _ => None,
        };
        if let Some(end) = boundary {
            out.push(&text[start..end]);
            start = if c == '\n' { end + 1 } else { end };
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out.retain(|s| !s.trim().is_empty());
    out
}

/// The seam candidate for one sentence, if it is long enough to split.
fn split_candidate(sentence: &str, config: &SentenceSplitConfig) -> Option<ReplacementCandidate> {
    if sentence.split_whitespace().count() <= config.max_words {
        return None;
    }
    for connector in &config.connectors {
        let Some(pos) = sentence.find(connector.as_str()) else {
            continue;
        };
        let left = &sentence[..pos];
        let right = &sentence[pos + connector.len()..];
        if left.split_whitespace().count() < config.min_words_before_split {
            continue;
        }
        let (Some(left_word), Some(right_word)) = (
            left.split_whitespace().next_back(),
            right.split_whitespace().next(),
        ) else {
            continue;
        };
        if !right_word.chars().next().is_some_and(char::is_alphabetic) {
            continue;
        }
        let period = if left_word.ends_with(['.', '!', '?']) { "" } else { "." };
        return Some(
            ReplacementCandidate::new(
                format!("{left_word}{connector}{right_word}"),
                format!("{left_word}{period} {}", capitalize_first(right_word)),
            )
            .whole_word(),
        );
    }
    None
}

impl CandidateGenerator for SentenceSplitGenerator {
    fn name(&self) -> &'static str {
        "SentenceSplit"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let config = &ctx.rules.sentence_split;
        let mut candidates = Vec::new();
        for sentence in sentences(text) {
            if let Some(candidate) = split_candidate(sentence, config) {
                let offset = text.find(candidate.old_text.as_str());
                candidates.push(match offset {
                    Some(o) => candidate.at(o),
                    None => candidate,
                });
            }
        }
        Ok(candidates)
    }
}
