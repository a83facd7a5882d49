use super::engine::{
    case_variants, distinct_mentions, first_occurrence, table_candidates, CandidateGenerator,
    GenerationContext,
};
use crate::error::GenerationError;
use crate::types::*;

/// Generic tech terms → specific technical phrases ("api" → "RESTful API
/// development & integration").
pub struct TechnicalKeywordGenerator;

impl CandidateGenerator for TechnicalKeywordGenerator {
    fn name(&self) -> &'static str {
        "TechnicalKeywords"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(ctx.text(), &ctx.rules.keyword_boosts.technical, false, MatchBoundary::Word))
    }
}

/// Business terms → outcome-oriented phrases.
pub struct BusinessKeywordGenerator;

impl CandidateGenerator for BusinessKeywordGenerator {
    fn name(&self) -> &'static str {
        "BusinessKeywords"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(ctx.text(), &ctx.rules.keyword_boosts.business, false, MatchBoundary::Word))
    }
}

/// Soft skills → leadership-oriented phrases.
pub struct SoftSkillKeywordGenerator;

impl CandidateGenerator for SoftSkillKeywordGenerator {
    fn name(&self) -> &'static str {
        "SoftSkillKeywords"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(ctx.text(), &ctx.rules.keyword_boosts.soft_skills, false, MatchBoundary::Word))
    }
}

/// Inserts a trending keyword after a phrase like "experience in" once the
/// document mentions enough of that keyword's triggers.
///
/// Each injection point carries at most one keyword; keywords are tried in
/// table order and each takes the first unused point present in the
/// document.
pub struct TrendingKeywordGenerator;

impl CandidateGenerator for TrendingKeywordGenerator {
    fn name(&self) -> &'static str {
        "TrendingKeywords"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let config = &ctx.rules.keyword_boosts.trending;
        let text = ctx.text();
        let document_lower = ctx.document_text.to_lowercase();
        let mut used: Vec<&str> = Vec::new();
        let mut candidates = Vec::new();

        for (keyword, triggers) in &config.keywords {
            if document_lower.contains(keyword.to_lowercase().as_str()) {
                continue;
            }
            let hits = distinct_mentions(&document_lower, triggers);
            if hits < config.min_triggers {
                continue;
            }
            let point = config.injection_points.iter().find(|p| {
                !used.contains(&p.as_str())
                    && first_occurrence(&document_lower, &p.to_lowercase(), MatchBoundary::Word).is_some()
            });
            let Some(point) = point else {
                continue;
            };
            used.push(point);
            tracing::trace!(keyword, hits, point, block = ctx.block.index, "trending keyword");

            let replacement = format!("{point} {keyword} and");
            for (variant, cased) in case_variants(point, &replacement, false) {
                if let Some(offset) = first_occurrence(text, &variant, MatchBoundary::Word) {
                    candidates.push(ReplacementCandidate::new(variant, cased).whole_word().at(offset));
                }
            }
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleBook;
    use crate::generators::testing::{generate, generate_in, rewrite};

    #[test]
    fn test_technical_boost() {
        assert_eq!(
            rewrite(&TechnicalKeywordGenerator, "Maintained the database"),
            "Maintained the database optimization & management"
        );
        // plural and compound forms are not the table's word
        assert!(generate(&TechnicalKeywordGenerator, "Maintained databases and subsystems").is_empty());
    }

    #[test]
    fn test_business_boost_keeps_sentence_case() {
        assert_eq!(
            rewrite(&BusinessKeywordGenerator, "Revenue doubled"),
            "Revenue growth & profitability optimization doubled"
        );
    }

    #[test]
    fn test_soft_skill_phrases() {
        assert_eq!(
            rewrite(&SoftSkillKeywordGenerator, "Strong communication skills"),
            "Strong executive communication & stakeholder engagement"
        );
    }

    #[test]
    fn test_trending_needs_two_triggers() {
        let rules = RuleBook::default();
        let block = "Experience in remote teams";
        assert!(generate_in(&TrendingKeywordGenerator, &rules, block, block).is_empty());

        let document = "Experience in remote teams\nRan hybrid offsites";
        let candidates = generate_in(&TrendingKeywordGenerator, &rules, block, document);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].old_text, "Experience in");
        assert_eq!(candidates[0].new_text, "Experience in remote work and");
    }

    #[test]
    fn test_trending_skips_keywords_already_present() {
        let rules = RuleBook::default();
        let block = "Skilled in remote work, hybrid and virtual teams";
        assert!(generate_in(&TrendingKeywordGenerator, &rules, block, block).is_empty());
    }

    #[test]
    fn test_trending_one_keyword_per_point() {
        let rules = RuleBook::default();
        let document = "Worked with agile scrum teams\nSkilled in cloud platform rollout";
        let candidates = generate_in(&TrendingKeywordGenerator, &rules, document, document);
        let olds: Vec<&str> = candidates.iter().map(|c| c.old_text.as_str()).collect();
        assert_eq!(olds, vec!["Skilled in", "Worked with"]);
        assert_eq!(candidates[0].new_text, "Skilled in agile methodology and");
        assert_eq!(candidates[1].new_text, "Worked with cloud computing and");
    }
}
