use super::engine::{table_candidates, CandidateGenerator, GenerationContext};
use crate::error::GenerationError;
use crate::types::*;

/// Common misspellings and British spellings → American spelling.
pub struct SpellingGenerator;

impl CandidateGenerator for SpellingGenerator {
    fn name(&self) -> &'static str {
        "Spelling"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(
            ctx.text(),
            &ctx.rules.spelling,
            false,
            MatchBoundary::Word,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::rewrite;

    #[test]
    fn test_corrections_keep_case() {
        assert_eq!(
            rewrite(&SpellingGenerator, "Acheived alot of buisness growth"),
            "Achieved a lot of business growth"
        );
    }
}
