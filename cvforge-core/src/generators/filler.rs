use super::engine::{capitalize_first, table_candidates, CandidateGenerator, GenerationContext};
use crate::error::GenerationError;
use crate::types::*;

/// Removes filler words ("very", "really") together with the whitespace
/// around them, and shortens wordy phrases ("in order to" → "to").
pub struct FillerWordGenerator;

/// Preceding text that makes the next word sentence-initial.
fn opens_sentence(before: &str, bullets: &[String]) -> bool {
    let before = before.trim_end();
    before.is_empty()
        || before.ends_with(['.', '!', '?', ':'])
        || bullets.iter().any(|b| before.ends_with(b.as_str()))
}

impl CandidateGenerator for FillerWordGenerator {
    fn name(&self) -> &'static str {
        "FillerWords"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let lower = text.to_lowercase();
        let bullets = &ctx.rules.punctuation.bullet_markers;
        let mut candidates = Vec::new();

        for word in &ctx.rules.filler.words {
            let word = word.to_lowercase();
            if !lower.contains(&word) {
                continue;
            }

            // mid-sentence: drop the word and one side of its whitespace
            for (pattern, replacement) in [
                (format!(" {word} "), " "),
                (format!(" {word},"), ","),
                (format!(" {word}."), "."),
            ] {
                if let Some(offset) = text.find(&pattern) {
                    candidates.push(ReplacementCandidate::new(pattern, replacement).at(offset));
                }
            }

            // sentence-initial: "Very good results" → "Good results"
            let capitalized = capitalize_first(&word);
            for (start, _) in text.match_indices(&capitalized) {
                let end = start + capitalized.len();
                if !MatchBoundary::Word.accepts(text, start, end)
                    || !opens_sentence(&text[..start], bullets)
                {
                    continue;
                }
                let Some(rest) = text[end..].strip_prefix(' ') else {
                    continue;
                };
                let next: String = rest.chars().take_while(|c| c.is_alphanumeric()).collect();
                if next.is_empty() {
                    continue;
                }
                candidates.push(
                    ReplacementCandidate::new(format!("{capitalized} {next}"), capitalize_first(&next))
                        .whole_word()
                        .at(start),
                );
            }
        }

        candidates.extend(table_candidates(
            text,
            &ctx.rules.filler.phrases,
            false,
            MatchBoundary::Word,
        ));
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::rewrite;

    #[test]
    fn test_deletion_cleanup() {
        assert_eq!(rewrite(&FillerWordGenerator, "a very good plan"), "a good plan");
        assert_eq!(
            rewrite(&FillerWordGenerator, "Delivered on time really."),
            "Delivered on time."
        );
    }

    #[test]
    fn test_sentence_initial_filler() {
        assert_eq!(
            rewrite(&FillerWordGenerator, "• Really improved retention"),
            "• Improved retention"
        );
        // mid-sentence capitalized word is not sentence-initial
        assert_eq!(
            rewrite(&FillerWordGenerator, "Met with Just Eat partners"),
            "Met with Just Eat partners"
        );
    }

    #[test]
    fn test_filler_phrases() {
        assert_eq!(
            rewrite(&FillerWordGenerator, "Automated tests in order to cut costs"),
            "Automated tests to cut costs"
        );
    }

    #[test]
    fn test_substrings_untouched() {
        // "just" inside "adjusted" is not a filler word
        assert_eq!(
            rewrite(&FillerWordGenerator, "Adjusted pricing"),
            "Adjusted pricing"
        );
    }
}
