use super::engine::{match_case, CandidateGenerator, GenerationContext};
use super::grammar::indefinite_article;
use crate::error::GenerationError;
use crate::types::*;

/// Weak adjectives → strong adjectives ("good" → "exceptional").
///
/// Only base forms are replaced; "better" has lemma "good" but no
/// comparative of the replacement is attempted. A directly preceding
/// "a"/"an" is rewritten with the adjective so it fits the new word.
pub struct WeakAdjectiveGenerator;

impl CandidateGenerator for WeakAdjectiveGenerator {
    fn name(&self) -> &'static str {
        "WeakAdjectives"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let tokens = ctx.tokens()?;
        let text = ctx.text();
        let table = &ctx.rules.weak_adjectives;
        let mut candidates = Vec::new();

        for (i, t) in tokens.iter().enumerate() {
            if t.pos != PartOfSpeech::Adj || t.surface.to_lowercase() != t.lemma {
                continue;
            }
            let Some(target) = table.get(&t.lemma) else {
                continue;
            };
            let replacement = match_case(&t.surface, target);

            let article = i
                .checked_sub(1)
                .and_then(|j| tokens.get(j))
                .filter(|prev| matches!(prev.surface.to_lowercase().as_str(), "a" | "an"))
                .filter(|prev| &text[prev.end..t.start] == " ");
            let candidate = match article {
                Some(prev) => {
                    let fixed = match_case(&prev.surface, indefinite_article(&replacement, &ctx.rules.grammar));
                    ReplacementCandidate::new(
                        &text[prev.start..t.end],
                        format!("{fixed} {replacement}"),
                    )
                    .at(prev.start)
                }
                None => ReplacementCandidate::new(t.surface.clone(), replacement).at(t.start),
            };
            candidates.push(candidate.whole_word());
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{generate, rewrite};

    #[test]
    fn test_adjective_upgrade() {
        assert_eq!(
            rewrite(&WeakAdjectiveGenerator, "Built a good pipeline"),
            "Built an exceptional pipeline"
        );
        assert_eq!(
            rewrite(&WeakAdjectiveGenerator, "An good team and great results"),
            "An exceptional team and outstanding results"
        );
    }

    #[test]
    fn test_comparatives_skipped() {
        assert!(generate(&WeakAdjectiveGenerator, "Found a bigger market").is_empty());
    }
}
