use super::engine::{is_all_upper, CandidateGenerator, GenerationContext};
use crate::config::PunctuationConfig;
use crate::error::GenerationError;
use crate::types::*;

/// Spacing/punctuation fixes plus a terminal period on sentence-like lines.
pub struct PunctuationGenerator;

/// Last word of a line that should end with a period, with its byte offset
/// in the block.
fn period_target<'t>(line: &'t str, line_start: usize, config: &PunctuationConfig) -> Option<(usize, &'t str)> {
    let trimmed = line.trim_end();
    let content = trimmed.trim_start();
    if content.is_empty()
        || content.ends_with(['.', '!', '?', ':'])
        || config.bullet_markers.iter().any(|m| content.starts_with(m.as_str()))
        || is_all_upper(content)
        || content.split_whitespace().count() <= config.min_words_for_period
    {
        return None;
    }
    let last = trimmed.rsplit(char::is_whitespace).next()?;
    if !last.chars().next_back().is_some_and(char::is_alphanumeric) {
        return None;
    }
    Some((line_start + trimmed.len() - last.len(), last))
}

impl CandidateGenerator for PunctuationGenerator {
    fn name(&self) -> &'static str {
        "Punctuation"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let config = &ctx.rules.punctuation;
        let mut candidates = Vec::new();

        for (from, to) in &config.spacing_fixes {
            if let Some(offset) = text.find(from.as_str()) {
                candidates.push(ReplacementCandidate::new(from.clone(), to.clone()).at(offset));
            }
        }

        // Every line ending in a given word gets the same edit, so a word only
        // qualifies when each line it ends qualifies.
        let mut line_ends: Vec<(&str, bool)> = Vec::new();
        let mut targets: Vec<(usize, &str)> = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            let target = period_target(line, offset, config);
            if let Some(last) = line.trim_end().rsplit(char::is_whitespace).next() {
                line_ends.push((last, target.is_some()));
            }
            targets.extend(target);
            offset += line.len() + 1;
        }
        for (start, word) in targets {
            if line_ends.iter().any(|(w, ok)| *w == word && !ok) {
                continue;
            }
            candidates.push(
                ReplacementCandidate::new(word, format!("{word}."))
                    .at_line_end()
                    .at(start),
            );
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::rewrite;

    #[test]
    fn test_spacing_fixes() {
        assert_eq!(
            rewrite(&PunctuationGenerator, "Led  the team , twice.."),
            "Led the team, twice."
        );
    }

    #[test]
    fn test_terminal_period() {
        assert_eq!(
            rewrite(&PunctuationGenerator, "Managed the regional sales team"),
            "Managed the regional sales team."
        );
        assert_eq!(
            rewrite(&PunctuationGenerator, "Built pipelines for data\n"),
            "Built pipelines for data.\n"
        );
    }

    #[test]
    fn test_headers_and_bullets_skipped() {
        for line in [
            "Work Experience",
            "PROFESSIONAL SUMMARY OF MY CAREER",
            "• Managed the regional sales team",
            "Contact me for references:",
        ] {
            assert_eq!(rewrite(&PunctuationGenerator, line), line);
        }
    }

    #[test]
    fn test_shared_last_word_with_header() {
        // "team" also ends a short header line, so neither line gets a period
        let text = "Sales team\nManaged the regional sales team";
        assert_eq!(rewrite(&PunctuationGenerator, text), text);
    }
}
