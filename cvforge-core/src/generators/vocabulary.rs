use super::engine::{match_case, CandidateGenerator, GenerationContext};
use crate::error::GenerationError;
use crate::types::*;

/// Casual nouns → executive vocabulary ("boss" → "executive leadership").
pub struct VocabularyGenerator;

impl CandidateGenerator for VocabularyGenerator {
    fn name(&self) -> &'static str {
        "ExecutiveVocabulary"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let tokens = ctx.tokens()?;
        let table = &ctx.rules.executive_vocabulary;
        let mut candidates = Vec::new();
        for token in tokens.iter().filter(|t| t.pos != PartOfSpeech::Verb) {
            if let Some(target) = table.get(&token.surface.to_lowercase()) {
                candidates.push(
                    ReplacementCandidate::new(token.surface.clone(), match_case(&token.surface, target))
                        .whole_word()
                        .at(token.start),
                );
            }
        }
        Ok(candidates)
    }
}
