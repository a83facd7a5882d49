use super::engine::{case_variants, CandidateGenerator, GenerationContext};
use crate::error::GenerationError;
use crate::types::*;

/// Achievement verbs without a number nearby get a quantified phrase
/// ("increased sales" → "increased by 30% sales").
///
/// The resolver replaces every occurrence of a candidate, so a variant is
/// only proposed when none of its occurrences is already quantified.
pub struct QuantificationGenerator;

fn digit_within(text: &str, from: usize, window: usize) -> bool {
    text[from..]
        .char_indices()
        .take_while(|(i, _)| *i < window)
        .any(|(_, c)| c.is_ascii_digit())
}

impl CandidateGenerator for QuantificationGenerator {
    fn name(&self) -> &'static str {
        "Quantification"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let lower = text.to_lowercase();
        let config = &ctx.rules.quantification;
        let mut candidates = Vec::new();

        for (verb, phrase) in &config.patterns {
            if !lower.contains(verb.as_str()) {
                continue;
            }
            for (variant, cased) in case_variants(verb, phrase, false) {
                let occurrences: Vec<usize> = text
                    .match_indices(variant.as_str())
                    .map(|(start, _)| start)
                    .filter(|&start| MatchBoundary::Word.accepts(text, start, start + variant.len()))
                    .collect();
                let Some(&first) = occurrences.first() else {
                    continue;
                };
                if occurrences
                    .iter()
                    .any(|&start| digit_within(text, start + variant.len(), config.lookahead_bytes))
                {
                    tracing::trace!("{variant:?} already quantified, skipping");
                    continue;
                }
                candidates.push(ReplacementCandidate::new(variant, cased).whole_word().at(first));
            }
        }
        Ok(candidates)
    }
}
