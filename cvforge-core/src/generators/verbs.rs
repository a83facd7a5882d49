use super::engine::{inflect, match_case, CandidateGenerator, GenerationContext};
use crate::annotation::VerbForm;
use crate::config::RuleTable;
use crate::error::GenerationError;
use crate::types::*;

/// Swap every verb token whose lemma is in `table`, carrying over the
/// token's inflection and casing.
fn verb_candidates(
    ctx: &GenerationContext<'_>,
    table: &RuleTable,
) -> Result<Vec<ReplacementCandidate>, GenerationError> {
    let tokens = ctx.tokens()?;
    let mut candidates = Vec::new();
    for token in tokens.iter().filter(|t| t.pos == PartOfSpeech::Verb) {
        let Some(target) = table.get(&token.lemma) else {
            continue;
        };
        let form = VerbForm::of(&token.surface, &token.lemma);
        let replacement = match_case(&token.surface, &inflect(target, form));
        candidates.push(
            ReplacementCandidate::new(token.surface.clone(), replacement)
                .whole_word()
                .at(token.start),
        );
    }
    Ok(candidates)
}

/// Weak verbs → power verbs ("helped" → "facilitated").
pub struct PowerVerbGenerator;

impl CandidateGenerator for PowerVerbGenerator {
    fn name(&self) -> &'static str {
        "PowerVerbs"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        verb_candidates(ctx, &ctx.rules.power_verbs)
    }
}

/// Everyday verbs → professional register ("asked" → "inquired").
pub struct ProfessionalVerbGenerator;

impl CandidateGenerator for ProfessionalVerbGenerator {
    fn name(&self) -> &'static str {
        "ProfessionalVerbs"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        verb_candidates(ctx, &ctx.rules.professional_verbs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleBook;
    use crate::generators::testing::{generate, rewrite};

    #[test]
    fn test_inflection_and_case_carried_over() {
        assert_eq!(rewrite(&PowerVerbGenerator, "Helped the team"), "Facilitated the team");
        assert_eq!(
            rewrite(&PowerVerbGenerator, "I am helping clients"),
            "I am facilitating clients"
        );
    }

    #[test]
    fn test_nouns_untouched() {
        // "work" after a determiner is a noun
        let candidates = generate(&PowerVerbGenerator, "Presented the work to clients");
        assert!(candidates.iter().all(|c| c.old_text != "work"));
    }

    #[test]
    fn test_word_boundary() {
        let candidates = generate(&ProfessionalVerbGenerator, "I asked for feedback");
        let asked = candidates.iter().find(|c| c.old_text == "asked").unwrap();
        assert_eq!(asked.new_text, "inquired");
        assert_eq!(asked.boundary, MatchBoundary::Word);
    }

    #[test]
    fn test_missing_tokens() {
        let rules = RuleBook::default();
        let block = TextBlock::detached("Helped the team");
        let ctx = GenerationContext {
            block: &block,
            tokens: None,
            document_text: "",
            rules: &rules,
        };
        assert_eq!(
            PowerVerbGenerator.generate(&ctx),
            Err(GenerationError::AnnotationUnavailable)
        );
    }
}
