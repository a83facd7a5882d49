use super::engine::{
    case_variants, distinct_mentions, first_occurrence, CandidateGenerator, GenerationContext,
};
use crate::config::{IndustryConfig, IndustryRule};
use crate::error::GenerationError;
use crate::types::*;

/// Injects industry keywords once the whole document clearly belongs to an
/// industry: skills headers get keyword bullets, generic skill terms get
/// keyword-rich replacements.
pub struct IndustryKeywordGenerator;

/// Distinct trigger terms of `rule` mentioned in the lowercased document.
/// Longer triggers also count inside other words ("ecosystem" → "system").
fn trigger_hits(rule: &IndustryRule, document_lower: &str) -> usize {
    distinct_mentions(document_lower, &rule.triggers)
}

fn is_skill_header(line: &str, config: &IndustryConfig) -> bool {
    if line.is_empty() || line.contains('\n') {
        return false;
    }
    let words = line.split_whitespace().count();
    let lower = line.to_lowercase();
    words <= config.max_header_words
        && config
            .skill_headers
            .iter()
            .any(|h| lower.contains(h.to_lowercase().as_str()))
}

/// Expand `{0}`, `{1}`, ... with the industry's keywords.
fn expand_template(
    term: &str,
    template: &str,
    industry: &str,
    keywords: &[String],
) -> Result<String, GenerationError> {
    let mut out = template.to_string();
    for i in 0..10 {
        let placeholder = format!("{{{i}}}");
        if !out.contains(&placeholder) {
            continue;
        }
        let keyword = keywords.get(i).ok_or_else(|| GenerationError::InvalidRule {
            rule: format!("industry.generic_terms[{term}]"),
            reason: format!("industry {industry} has no keyword {i}"),
        })?;
        out = out.replace(&placeholder, keyword);
    }
    Ok(out)
}

impl CandidateGenerator for IndustryKeywordGenerator {
    fn name(&self) -> &'static str {
        "IndustryKeywords"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let config = &ctx.rules.industry;
        let text = ctx.text();
        let document_lower = ctx.document_text.to_lowercase();
        let mut candidates = Vec::new();

        for (industry, rule) in &config.industries {
            let hits = trigger_hits(rule, &document_lower);
            if hits < config.min_triggers {
                continue;
            }
            tracing::trace!(industry, hits, block = ctx.block.index, "industry detected");

            let header = text.trim();
            if is_skill_header(header, config) {
                let bullets: Vec<&String> = rule.keywords.iter().take(config.bullet_count).collect();
                if !bullets.is_empty() {
                    let mut expanded = header.to_string();
                    for keyword in bullets {
                        expanded.push_str("\n• ");
                        expanded.push_str(keyword);
                    }
                    let offset = text.len() - text.trim_start().len();
                    candidates.push(ReplacementCandidate::new(header, expanded).at(offset));
                }
            }

            for (term, template) in &config.generic_terms {
                let replacement = expand_template(term, template, industry, &rule.keywords)?;
                for (variant, cased) in case_variants(term, &replacement, false) {
                    if let Some(offset) = first_occurrence(text, &variant, MatchBoundary::Word) {
                        candidates.push(ReplacementCandidate::new(variant, cased).whole_word().at(offset));
                    }
                }
            }
        }
        Ok(candidates)
    }
}
