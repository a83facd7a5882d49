//! Human-readable recommendations built from an [`AnalysisReport`]: one
//! section per scoring dimension plus an overall section.

use crate::analysis::{
    AnalysisReport, ClarityAnalysis, ComponentScores, GrammarAnalysis, KeywordAnalysis,
    LanguageAnalysis,
};
use serde::Serialize;

const MAX_EXAMPLES: usize = 5;
const LONG_SENTENCE_WORDS: f64 = 20.0;
const SHORT_SENTENCE_WORDS: f64 = 8.0;
const MANY_BULLETS: usize = 5;

const FILLER_WORDS: &[&str] = &["very", "really", "quite", "actually", "basically"];
const WEAK_DESCRIPTORS: &[&str] = &["good", "great", "nice", "excellent"];
const PASSIVE_MARKERS: &[&str] = &["responsible for", "helped with"];

/// Weak terms listed first when present, most damaging first.
const PRIORITY_TERMS: &[&str] = &[
    "responsible for",
    "helped with",
    "worked on",
    "good",
    "great",
    "various",
    "many",
];
const MAX_PRIORITY_TERMS: usize = 8;

const TERM_IMPROVEMENTS: &[(&str, &str)] = &[
    ("responsible for", "managed"),
    ("helped with", "contributed to"),
    ("worked on", "developed"),
    ("good", "exceptional"),
    ("great", "outstanding"),
    ("various", "diverse"),
    ("many", "numerous"),
    ("things", "initiatives"),
    ("stuff", "materials"),
];

const SYNONYMS: &[(&str, &[&str])] = &[
    ("marketing", &["promotional", "advertising", "brand development"]),
    ("managed", &["supervised", "directed", "oversaw"]),
    ("developed", &["created", "designed", "built"]),
    ("skills", &["competencies", "expertise", "proficiencies"]),
    ("experience", &["background", "expertise", "track record"]),
];

/// Section header → words whose presence suggests the section belongs in
/// the résumé.
const SUGGESTED_SECTIONS: &[(&str, &[&str])] = &[
    ("PROFESSIONAL EXPERIENCE", &["experience", "worked", "position", "job"]),
    ("EDUCATION", &["education", "degree", "university", "college"]),
    ("CORE COMPETENCIES", &["skills", "proficient", "knowledge"]),
    ("ACHIEVEMENTS", &["achievement", "award", "recognition"]),
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedbackSection {
    pub title: String,
    pub summary: String,
    pub details: Vec<String>,
    pub suggestions: Vec<String>,
}

impl FeedbackSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    fn detail(&mut self, line: impl Into<String>) {
        self.details.push(line.into());
    }

    fn suggest(&mut self, line: impl Into<String>) {
        self.suggestions.push(line.into());
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    /// Characters in the analyzed text
    pub resume_length: usize,
    pub overall_score: f64,
    pub component_scores: ComponentScores,
    /// Grammar, clarity, language, keywords, then overall
    pub sections: Vec<FeedbackSection>,
}

/// Build the feedback report for `text` from its analysis.
pub fn feedback(text: &str, report: &AnalysisReport) -> FeedbackReport {
    let mut sections = vec![
        ResumeFeedback::grammar_spelling(&report.grammar),
        ResumeFeedback::clarity_structure(&report.clarity, text),
        ResumeFeedback::language_strength(&report.language, text),
        ResumeFeedback::keyword_usage(&report.keywords),
    ];
    sections.push(ResumeFeedback::overall(report.overall_score, &sections));
    FeedbackReport {
        resume_length: text.chars().count(),
        overall_score: report.overall_score,
        component_scores: report.component_scores,
        sections,
    }
}

/// Section builders, each usable on its own.
pub struct ResumeFeedback;

impl ResumeFeedback {
    pub fn grammar_spelling(analysis: &GrammarAnalysis) -> FeedbackSection {
        let mut section = FeedbackSection::new("Grammar & Spelling");
        let issues = analysis.grammar_error_count + analysis.spelling_error_count;
        section.summary = if issues == 0 {
            "Excellent! No grammar or spelling issues were found.".to_string()
        } else {
            format!("Found {issues} potential issues that could be improved.")
        };

        if !analysis.unterminated_sentences.is_empty() {
            section.detail(format!("Grammar issues: {}", analysis.unterminated_sentences.len()));
            for sentence in analysis.unterminated_sentences.iter().take(MAX_EXAMPLES) {
                section.detail(format!("- Sentence without ending punctuation ({sentence})"));
            }
            section.suggest("Consider: end each sentence with a period.");
        }
        if !analysis.misspellings.is_empty() {
            section.detail(format!("Spelling issues: {}", analysis.misspellings.len()));
            for m in analysis.misspellings.iter().take(MAX_EXAMPLES) {
                section.detail(format!("- Possible misspelling: {}", m.word));
                section.suggest(format!("Consider: {}", m.suggestion));
            }
        }
        if issues > 0 {
            section.suggest("Use a spell checker or grammar tool to catch these issues.");
            section.suggest("Have someone else review your resume for errors you might have missed.");
        }
        section
    }

    pub fn clarity_structure(analysis: &ClarityAnalysis, text: &str) -> FeedbackSection {
        let mut section = FeedbackSection::new("Clarity & Structure");
        let lower = text.to_lowercase();
        let avg = analysis.avg_sentence_length;

        if avg > LONG_SENTENCE_WORDS {
            section.detail(format!(
                "Sentence length averaging {avg:.1} words could be more concise for better readability."
            ));
            if lower.contains("responsible for") || lower.contains("worked on") {
                section.suggest("Start sentences with action verbs to eliminate wordy phrases like 'responsible for'.");
            } else {
                section.suggest("Break complex sentences at natural connection points for improved flow.");
            }
        } else if avg < SHORT_SENTENCE_WORDS {
            section.detail(format!("Sentences are quite brief at {avg:.1} words average."));
            section.suggest("Consider expanding key accomplishments with more specific details and impact.");
        } else {
            section.detail(format!("Good sentence flow with {avg:.1} words average length."));
        }

        if analysis.has_clear_sections {
            section.detail("Resume demonstrates clear organizational structure.");
        } else {
            section.detail("Document structure could benefit from more distinct section organization.");
            let suggested: Vec<&str> = SUGGESTED_SECTIONS
                .iter()
                .filter(|(_, words)| words.iter().any(|w| lower.contains(w)))
                .map(|(header, _)| *header)
                .take(3)
                .collect();
            if suggested.is_empty() {
                section.suggest("Add distinct section headers to improve document navigation and readability.");
            } else {
                section.suggest(format!(
                    "Consider organizing content under clear headers: {}",
                    suggested.join(", ")
                ));
            }
        }

        if !analysis.has_bullet_points {
            section.detail("Content organization would benefit from bullet point formatting.");
            section.suggest("Use bullet points to highlight key achievements and make content more scannable.");
        } else if analysis.bullet_point_count > MANY_BULLETS {
            section.detail(format!(
                "Good use of bullet points ({} found) for easy scanning.",
                analysis.bullet_point_count
            ));
        } else {
            section.detail("Some bullet point formatting present.");
        }

        if analysis.repeated_words.is_empty() {
            section.detail("Good vocabulary variety throughout the document.");
        } else {
            let mut top: Vec<(&String, &usize)> = analysis.repeated_words.iter().collect();
            top.sort_by(|a, b| b.1.cmp(a.1));
            top.truncate(3);
            section.detail("Vocabulary variety could be enhanced:");
            for (word, count) in &top {
                section.detail(format!("- \"{word}\" appears {count} times"));
            }
            let synonyms: Vec<String> = top
                .iter()
                .filter_map(|(word, _)| {
                    let (_, alternatives) = SYNONYMS.iter().find(|(w, _)| *w == word.to_lowercase())?;
                    Some(format!("Vary '{word}' with alternatives: {}", alternatives.join(", ")))
                })
                .collect();
            if synonyms.is_empty() {
                section.suggest("Consider using varied terminology to maintain reader engagement.");
            } else {
                section.suggestions.extend(synonyms);
            }
        }

        let positive = section
            .details
            .iter()
            .filter(|d| {
                let d = d.to_lowercase();
                ["good", "clear", "demonstrates", "benefit"].iter().any(|w| d.contains(w))
            })
            .count() as f64;
        let total = section.details.len() as f64;
        section.summary = if positive >= total * 0.7 {
            "Strong structural foundation with excellent readability and organization."
        } else if positive >= total * 0.4 {
            "Solid document structure with opportunities for enhanced clarity and impact."
        } else {
            "Content shows potential and would benefit from structural refinements for maximum impact."
        }
        .to_string();
        section
    }

    pub fn language_strength(analysis: &LanguageAnalysis, text: &str) -> FeedbackSection {
        let mut section = FeedbackSection::new("Language Strength");
        let weak_count = analysis.weak_terms_count;

        if weak_count == 0 {
            section.detail("Excellent language strength throughout the document.");
            section.summary = "Outstanding use of strong, professional language.".to_string();
        } else {
            let (detail, summary) = if weak_count > 15 {
                (
                    format!("Language could be significantly strengthened ({weak_count} opportunities identified)."),
                    "Excellent opportunity to transform language for maximum professional impact.",
                )
            } else if weak_count > 8 {
                (
                    format!("Several language enhancement opportunities available ({weak_count} areas identified)."),
                    "Good foundation with clear opportunities for language strengthening.",
                )
            } else {
                (
                    format!("Minor language refinements possible ({weak_count} areas for improvement)."),
                    "Strong language foundation with fine-tuning opportunities.",
                )
            };
            section.detail(detail);
            section.summary = summary.to_string();

            for (category, terms) in categorize_weak_terms(&analysis.weak_terms) {
                if terms.is_empty() {
                    continue;
                }
                let examples = terms.iter().take(3).copied().collect::<Vec<_>>().join(", ");
                section.suggest(category.suggestion(&examples));
            }

            section.detail("High-impact language opportunities:");
            for term in prioritize_weak_terms(&analysis.weak_terms).into_iter().take(MAX_EXAMPLES) {
                match improvement_for(term) {
                    Some(better) => section.detail(format!("- \"{term}\" → \"{better}\"")),
                    None => section.detail(format!("- \"{term}\"")),
                }
            }
        }

        let verbs = analysis.action_verbs_count;
        if verbs >= 5 {
            section.detail(format!("Excellent use of action verbs ({verbs} identified)."));
            section.detail(format!("Strong action verbs used: {}", analysis.action_verbs.iter().take(5).cloned().collect::<Vec<_>>().join(", ")));
        } else if verbs >= 3 {
            section.detail(format!("Good use of action verbs ({verbs} found)."));
            section.detail(format!("Strong action verbs used: {}", analysis.action_verbs.iter().take(3).cloned().collect::<Vec<_>>().join(", ")));
            section.suggest("Consider adding more action verbs to strengthen other statements.");
        } else if verbs > 0 {
            section.detail(format!("Some action verbs present ({verbs} found)."));
            section.suggest("Incorporate more strong action verbs to begin statements and highlight achievements.");
        } else {
            section.detail("Opportunity to incorporate powerful action verbs.");
            section.suggest(
                "Begin bullet points with strong action verbs like 'achieved,' 'optimized,' 'spearheaded,' or 'transformed.'",
            );
        }

        let lower = text.to_lowercase();
        if !text.chars().any(|c| c.is_ascii_digit()) {
            section.suggest(
                "Consider adding specific numbers and percentages to quantify your achievements (e.g., 'increased sales by 25%').",
            );
        }
        if lower.contains("marketing") && lower.contains("campaigns") {
            section.suggest("Specify marketing campaign results, audience reach, or conversion improvements.");
        } else if lower.contains("sales") {
            section.suggest("Include specific sales figures, territory size, or performance metrics.");
        } else if lower.contains("management") {
            section.suggest("Quantify team size, budget responsibility, or process improvements managed.");
        }
        section
    }

    pub fn keyword_usage(analysis: &KeywordAnalysis) -> FeedbackSection {
        let mut section = FeedbackSection::new("Keyword Optimization");
        let total = analysis.total_unique_keywords;
        let density = analysis.keyword_density * 100.0;

        section.summary = if total >= 10 {
            format!("Good use of industry keywords ({total} unique keywords found).")
        } else if total >= 5 {
            format!("Adequate keyword usage ({total} unique keywords found).")
        } else {
            format!("Limited keyword usage ({total} unique keywords found).")
        };

        section.detail(format!("Keyword density: {density:.1}%"));
        if density < 2.0 {
            section.detail("Keyword density is low.");
            section.suggest("Incorporate more industry-specific keywords and skills relevant to your target job.");
        } else if density > 7.0 {
            section.detail("Keyword density may be too high (potential keyword stuffing).");
            section.suggest("Ensure keywords are used naturally and not forced into the text.");
        } else {
            section.detail("Keyword density is in the optimal range.");
        }

        section.detail("Keywords by category:");
        for (category, keywords) in analysis.found.iter().filter(|(_, k)| !k.is_empty()) {
            section.detail(format!(
                "- {}: {} keywords",
                crate::generators::engine::capitalize_first(category),
                keywords.len()
            ));
            let examples: Vec<&str> = keywords.iter().take(MAX_EXAMPLES).map(String::as_str).collect();
            section.detail(format!("  Examples: {}", examples.join(", ")));
        }

        section.suggest("Review job descriptions for target positions and incorporate matching keywords.");
        section.suggest("Include technical skills and tools specific to your field.");
        let missing = |category: &str| analysis.found.get(category).is_some_and(Vec::is_empty);
        if missing("technology") {
            section.suggest("Add technical skills, programming languages, or tools you're proficient with.");
        }
        if missing("business") {
            section.suggest("Include business-related skills or achievements that demonstrate ROI or business impact.");
        }
        if missing("general") {
            section.suggest("Add soft skills and transferable skills that are valuable across different roles.");
        }
        section
    }

    /// Score interpretation plus the sections whose summaries flag a weak
    /// area.
    pub fn overall(score: f64, sections: &[FeedbackSection]) -> FeedbackSection {
        let mut section = FeedbackSection::new("Overall Recommendations");
        section.summary = format!("Your resume scored {score:.1}/100");
        section.detail(if score >= 85.0 {
            "Excellent resume! Only minor improvements needed."
        } else if score >= 70.0 {
            "Good resume with some areas for improvement."
        } else if score >= 50.0 {
            "Average resume that needs several significant improvements."
        } else {
            "Resume needs major revisions to be competitive."
        });

        let priority: Vec<&str> = sections
            .iter()
            .filter(|s| {
                let summary = s.summary.to_lowercase();
                summary.contains("needs significant") || summary.contains("limited")
            })
            .map(|s| s.title.as_str())
            .collect();
        if !priority.is_empty() {
            section.detail(format!("Priority improvement areas: {}", priority.join(", ")));
        }

        for suggestion in [
            "Focus on quantifiable achievements rather than just listing responsibilities.",
            "Tailor your resume for each specific job application.",
            "Keep resume length appropriate (1 page for entry-level, 2 pages for experienced professionals).",
            "Ensure consistent formatting throughout the document.",
            "Have your resume reviewed by a professional in your industry.",
        ] {
            section.suggest(suggestion);
        }
        section
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WeakCategory {
    Filler,
    Descriptor,
    Passive,
    Vague,
}

impl WeakCategory {
    fn suggestion(self, examples: &str) -> String {
        match self {
            Self::Filler => format!(
                "Remove unnecessary filler words like '{examples}' to create more direct, impactful statements."
            ),
            Self::Descriptor => format!(
                "Replace generic descriptors like '{examples}' with specific, measurable achievements."
            ),
            Self::Passive => format!("Transform passive phrases like '{examples}' into strong action statements."),
            Self::Vague => format!("Specify vague terms like '{examples}' with concrete details and outcomes."),
        }
    }
}

fn categorize_weak_terms(terms: &[String]) -> [(WeakCategory, Vec<&str>); 4] {
    let mut categories = [
        (WeakCategory::Filler, Vec::new()),
        (WeakCategory::Descriptor, Vec::new()),
        (WeakCategory::Passive, Vec::new()),
        (WeakCategory::Vague, Vec::new()),
    ];
    for term in terms {
        let lower = term.to_lowercase();
        let slot = if FILLER_WORDS.contains(&lower.as_str()) {
            0
        } else if WEAK_DESCRIPTORS.contains(&lower.as_str()) {
            1
        } else if PASSIVE_MARKERS.iter().any(|m| lower.contains(m)) {
            2
        } else {
            3
        };
        categories[slot].1.push(term.as_str());
    }
    categories
}

fn prioritize_weak_terms(terms: &[String]) -> Vec<&str> {
    let mut ordered: Vec<&str> = Vec::new();
    for priority in PRIORITY_TERMS {
        for term in terms {
            if term.to_lowercase().contains(priority) && !ordered.contains(&term.as_str()) {
                ordered.push(term);
            }
        }
    }
    for term in terms {
        if !ordered.contains(&term.as_str()) {
            ordered.push(term);
        }
    }
    ordered.truncate(MAX_PRIORITY_TERMS);
    ordered
}

fn improvement_for(term: &str) -> Option<&'static str> {
    let lower = term.to_lowercase();
    TERM_IMPROVEMENTS
        .iter()
        .find(|(weak, _)| lower.contains(weak))
        .map(|(_, strong)| *strong)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, Misspelling};
    use crate::annotation::LexiconTagger;
    use crate::config::RuleBook;
    use std::collections::BTreeMap;

    fn report_for(text: &str) -> AnalysisReport {
        let rules = RuleBook::default();
        analyze(text, &rules, &LexiconTagger::new(&rules)).unwrap()
    }

    fn section<'a>(report: &'a FeedbackReport, title: &str) -> &'a FeedbackSection {
        report.sections.iter().find(|s| s.title == title).unwrap()
    }

    #[test]
    fn test_report_has_every_section() {
        let text = "Responsible for good sales work\nHelped with various things";
        let report = feedback(text, &report_for(text));
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Grammar & Spelling",
                "Clarity & Structure",
                "Language Strength",
                "Keyword Optimization",
                "Overall Recommendations",
            ]
        );
        assert_eq!(report.resume_length, text.chars().count());
        assert_eq!(section(&report, "Overall Recommendations").suggestions.len(), 5);
    }

    #[test]
    fn test_grammar_examples() {
        let analysis = GrammarAnalysis {
            unterminated_sentences: vec![],
            misspellings: vec![Misspelling {
                word: "acheived".to_string(),
                suggestion: "achieved".to_string(),
            }],
            grammar_error_count: 0,
            spelling_error_count: 1,
            grammar_error_rate: 0.0,
            spelling_error_rate: 0.1,
        };
        let section = ResumeFeedback::grammar_spelling(&analysis);
        assert_eq!(section.summary, "Found 1 potential issues that could be improved.");
        assert_eq!(section.details, vec!["Spelling issues: 1", "- Possible misspelling: acheived"]);
        assert_eq!(section.suggestions[0], "Consider: achieved");
        assert_eq!(section.suggestions.len(), 3);
    }

    #[test]
    fn test_clarity_suggests_sections_and_bullets() {
        let analysis = ClarityAnalysis {
            avg_sentence_length: 12.0,
            complex_sentence_count: 0,
            complex_sentences: vec![],
            bullet_point_count: 0,
            paragraph_count: 1,
            repeated_words: BTreeMap::from([("managed".to_string(), 5), ("widgets".to_string(), 4)]),
            headings: vec![],
            has_clear_sections: false,
            has_bullet_points: false,
        };
        let section = ResumeFeedback::clarity_structure(&analysis, "Ten years of experience. Degree in physics");
        assert!(section.suggestions.contains(
            &"Consider organizing content under clear headers: PROFESSIONAL EXPERIENCE, EDUCATION".to_string()
        ));
        assert!(section
            .suggestions
            .contains(&"Vary 'managed' with alternatives: supervised, directed, oversaw".to_string()));
        assert_eq!(section.details[section.details.len() - 2], "- \"managed\" appears 5 times");
        assert!(section.details.iter().any(|d| d.contains("bullet point formatting")));
    }

    #[test]
    fn test_language_priorities_and_hints() {
        let text = "Responsible for sales\nDid good things";
        let report = feedback(text, &report_for(text));
        let language = section(&report, "Language Strength");
        let priority_start = language
            .details
            .iter()
            .position(|d| d == "High-impact language opportunities:")
            .unwrap();
        assert_eq!(language.details[priority_start + 1], "- \"responsible for\" → \"managed\"");
        assert!(language.suggestions.iter().any(|s| s.starts_with("Consider adding specific numbers")));
        assert!(language.suggestions.iter().any(|s| s.starts_with("Include specific sales figures")));
    }

    #[test]
    fn test_weak_term_helpers() {
        let terms: Vec<String> = ["various", "very", "good", "responsible for", "stuff"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let categories = categorize_weak_terms(&terms);
        assert_eq!(categories[0].1, vec!["very"]);
        assert_eq!(categories[1].1, vec!["good"]);
        assert_eq!(categories[2].1, vec!["responsible for"]);
        assert_eq!(categories[3].1, vec!["various", "stuff"]);
        assert_eq!(
            prioritize_weak_terms(&terms),
            vec!["responsible for", "good", "various", "very", "stuff"]
        );
        assert_eq!(improvement_for("stuff"), Some("materials"));
        assert_eq!(improvement_for("very"), None);
    }

    #[test]
    fn test_keyword_density_and_missing_categories() {
        let analysis = KeywordAnalysis {
            found: BTreeMap::from([
                ("business".to_string(), vec![]),
                ("general".to_string(), vec!["leadership".to_string()]),
                ("technology".to_string(), vec!["python".to_string(), "docker".to_string()]),
            ]),
            total_unique_keywords: 3,
            keyword_density: 0.1,
        };
        let section = ResumeFeedback::keyword_usage(&analysis);
        assert_eq!(section.summary, "Limited keyword usage (3 unique keywords found).");
        assert_eq!(section.details[0], "Keyword density: 10.0%");
        assert!(section.details.contains(&"- Technology: 2 keywords".to_string()));
        assert!(section.details.contains(&"  Examples: python, docker".to_string()));
        assert!(section.suggestions.iter().any(|s| s.starts_with("Include business-related")));
        assert!(!section.suggestions.iter().any(|s| s.starts_with("Add technical skills")));
    }

    #[test]
    fn test_overall_priority_areas() {
        let mut keywords = FeedbackSection::new("Keyword Optimization");
        keywords.summary = "Limited keyword usage (1 unique keywords found).".to_string();
        let mut grammar = FeedbackSection::new("Grammar & Spelling");
        grammar.summary = "Excellent! No grammar or spelling issues were found.".to_string();
        let section = ResumeFeedback::overall(72.4, &[grammar, keywords]);
        assert_eq!(section.summary, "Your resume scored 72.4/100");
        assert_eq!(
            section.details,
            vec![
                "Good resume with some areas for improvement.",
                "Priority improvement areas: Keyword Optimization",
            ]
        );
    }
}
