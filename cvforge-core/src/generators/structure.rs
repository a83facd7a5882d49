use super::engine::{first_occurrence, is_all_upper, lines_with_offsets, CandidateGenerator, GenerationContext};
use crate::analysis::ResumeAnalytics;
use crate::config::RuleBook;
use crate::error::GenerationError;
use crate::types::*;
use regex::Regex;
use std::sync::LazyLock;

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(\d{1,2}\.)[ \t]+\S").unwrap());

/// Layout fixes for documents without bullets or section headers:
/// numbered items become bullets, achievement lines get a bullet, and short
/// lines naming a section become that section's header.
///
/// The gates look at the whole document, so a résumé that already uses
/// bullets anywhere gets no new ones.
pub struct StructureGenerator;

fn is_bulleted(content: &str, rules: &RuleBook) -> bool {
    rules
        .punctuation
        .bullet_markers
        .iter()
        .any(|m| content.starts_with(m.as_str()))
}

fn mentions_word(content_lower: &str, words: &[String]) -> bool {
    words
        .iter()
        .any(|w| first_occurrence(content_lower, &w.to_lowercase(), MatchBoundary::Word).is_some())
}

fn is_achievement_line(content: &str, rules: &RuleBook) -> bool {
    !content.is_empty()
        && !is_bulleted(content, rules)
        && !NUMBERED_RE.is_match(content)
        && !content.ends_with(':')
        && !is_all_upper(content)
        && mentions_word(&content.to_lowercase(), &rules.structure.achievement_words)
}

/// The header a short line should become, if it names a section.
fn section_header<'r>(content: &str, rules: &'r RuleBook) -> Option<&'r str> {
    let config = &rules.structure;
    let words: Vec<&str> = content.split_whitespace().collect();
    if words.is_empty()
        || words.len() > config.max_header_words
        || content.contains(':')
        || is_all_upper(content)
        || is_bulleted(content, rules)
    {
        return None;
    }
    let first = words[0].to_lowercase();
    if rules.analysis.action_verbs.iter().any(|v| *v == first) {
        return None;
    }
    let lower = content.to_lowercase();
    config
        .section_headers
        .iter()
        .find(|(_, keywords)| mentions_word(&lower, keywords))
        .map(|(header, _)| header.as_str())
        .filter(|header| *header != content)
}

impl CandidateGenerator for StructureGenerator {
    fn name(&self) -> &'static str {
        "Structure"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let rules = ctx.rules;
        let text = ctx.text();
        let needs_bullets = ResumeAnalytics::bullet_count(ctx.document_text) == 0;
        let needs_headers = !ResumeAnalytics::has_clear_sections(ctx.document_text);
        let mut candidates: Vec<ReplacementCandidate> = Vec::new();
        if !needs_bullets && !needs_headers {
            return Ok(candidates);
        }

        // A bullet goes in front of a line's first word, and every line
        // starting with that word gets it, so each such line must qualify.
        let mut first_words: Vec<(&str, bool)> = Vec::new();
        let mut bullet_targets: Vec<(usize, &str)> = Vec::new();

        for (line_start, line) in lines_with_offsets(text) {
            let content = line.trim();
            let offset = line_start + (line.len() - line.trim_start().len());

            if needs_bullets && rules.structure.numbered_to_bullets {
                if let Some(number) = NUMBERED_RE.captures(line).and_then(|c| c.get(1)) {
                    let number_offset = line_start + number.start();
                    if !candidates.iter().any(|c| c.old_text == number.as_str()) {
                        candidates.push(
                            ReplacementCandidate::new(number.as_str(), "•")
                                .at_line_start()
                                .at(number_offset),
                        );
                    }
                    continue;
                }
            }

            if needs_headers {
                if let Some(header) = section_header(content, rules) {
                    tracing::trace!(header, block = ctx.block.index, "section header");
                    candidates.push(ReplacementCandidate::new(content, header).whole_line().at(offset));
                    continue;
                }
            }

            if needs_bullets {
                if let Some(first) = content.split_whitespace().next() {
                    let qualifies = is_achievement_line(content, rules);
                    first_words.push((first, qualifies));
                    if qualifies {
                        bullet_targets.push((offset, first));
                    }
                }
            }
        }

        for (offset, first) in bullet_targets {
            if first_words.iter().any(|(w, ok)| *w == first && !ok)
                || candidates.iter().any(|c| c.old_text == first)
            {
                continue;
            }
            candidates.push(
                ReplacementCandidate::new(first, format!("• {first}"))
                    .at_line_start()
                    .at(offset),
            );
        }
        Ok(candidates)
    }
}
