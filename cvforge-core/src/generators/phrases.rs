// Literal phrase tables: weak phrases, passive constructions, skill names.
// All three match every case variant of the table key on word boundaries.

use super::engine::{table_candidates, CandidateGenerator, GenerationContext};
use crate::error::GenerationError;
use crate::types::*;

/// "responsible for" → "spearheaded", including the UPPER variant used in headings.
pub struct WeakPhraseGenerator;

impl CandidateGenerator for WeakPhraseGenerator {
    fn name(&self) -> &'static str {
        "WeakPhrases"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(
            ctx.text(),
            &ctx.rules.weak_phrases,
            true,
            MatchBoundary::Word,
        ))
    }
}

/// "was responsible for" → "directed"
pub struct PassiveVoiceGenerator;

impl CandidateGenerator for PassiveVoiceGenerator {
    fn name(&self) -> &'static str {
        "PassiveVoice"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(
            ctx.text(),
            &ctx.rules.passive_to_active,
            false,
            MatchBoundary::Word,
        ))
    }
}

/// "leadership" → "strategic leadership & team development"
pub struct SkillUpgradeGenerator;

impl CandidateGenerator for SkillUpgradeGenerator {
    fn name(&self) -> &'static str {
        "SkillUpgrades"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(
            ctx.text(),
            &ctx.rules.skill_upgrades,
            false,
            MatchBoundary::Word,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::{generate, rewrite};

    #[test]
    fn test_weak_phrase_variants() {
        assert_eq!(
            rewrite(&WeakPhraseGenerator, "I was responsible for sales and marketing."),
            "I was spearheaded sales and marketing."
        );
        assert_eq!(
            rewrite(&WeakPhraseGenerator, "Responsible for onboarding"),
            "Spearheaded onboarding"
        );
        assert_eq!(
            rewrite(&WeakPhraseGenerator, "RESPONSIBLE FOR SALES"),
            "SPEARHEADED SALES"
        );
    }

    #[test]
    fn test_passive_beats_shorter_phrase_when_pooled() {
        // both generators propose; the longer passive span wins in resolution
        let text = "I was responsible for sales";
        let mut pool = generate(&WeakPhraseGenerator, text);
        pool.extend(generate(&PassiveVoiceGenerator, text));
        let resolution = crate::rewrite::resolve(text, &pool);
        assert_eq!(
            crate::rewrite::apply_edits(text, &resolution.edits),
            "I directed sales"
        );
    }

    #[test]
    fn test_skill_upgrade() {
        assert_eq!(
            rewrite(&SkillUpgradeGenerator, "Skills: teamwork, leadership"),
            "Skills: cross-functional collaboration & team synergy, strategic leadership & team development"
        );
    }
}
