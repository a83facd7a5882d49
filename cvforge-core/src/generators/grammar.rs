use super::engine::{
    capitalize_first, is_all_upper, lines_with_offsets, match_case, table_candidates,
    CandidateGenerator, GenerationContext,
};
use crate::config::{GrammarConfig, PunctuationConfig};
use crate::error::GenerationError;
use crate::types::*;
use regex::Regex;
use std::sync::LazyLock;

static ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([Aa]n?) (\p{L}[\p{L}'\-]*)").unwrap());

/// "a" or "an" for the word that follows, judged by its sound: silent-h
/// words take "an", "use"/"one"/"eu"-style words take "a", other vowels "an".
pub fn indefinite_article(word: &str, config: &GrammarConfig) -> &'static str {
    let lower = word.to_lowercase();
    if config.silent_h.iter().any(|h| lower.starts_with(h.as_str())) {
        return "an";
    }
    if config
        .consonant_sound_prefixes
        .iter()
        .any(|p| lower.starts_with(p.as_str()))
    {
        return "a";
    }
    match lower.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Fixes "a"/"an" before the following word. Acronyms are left alone since
/// their article depends on how they are spoken.
pub struct ArticleUsageGenerator;

impl CandidateGenerator for ArticleUsageGenerator {
    fn name(&self) -> &'static str {
        "ArticleUsage"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let config = &ctx.rules.grammar;
        let mut candidates: Vec<ReplacementCandidate> = Vec::new();

        for caps in ARTICLE_RE.captures_iter(text) {
            let (Some(whole), Some(article), Some(word)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            if is_all_upper(word.as_str()) {
                continue;
            }
            let expected = indefinite_article(word.as_str(), config);
            if article.as_str().eq_ignore_ascii_case(expected) {
                continue;
            }
            let fixed = format!("{} {}", match_case(article.as_str(), expected), word.as_str());
            if candidates.iter().any(|c| c.old_text == whole.as_str()) {
                continue;
            }
            candidates.push(
                ReplacementCandidate::new(whole.as_str(), fixed)
                    .whole_word()
                    .at(whole.start()),
            );
        }
        Ok(candidates)
    }
}

/// Common agreement slips ("data is" → "data are", "there is many" →
/// "there are many").
pub struct SubjectVerbAgreementGenerator;

impl CandidateGenerator for SubjectVerbAgreementGenerator {
    fn name(&self) -> &'static str {
        "SubjectVerbAgreement"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        Ok(table_candidates(
            ctx.text(),
            &ctx.rules.grammar.agreement,
            false,
            MatchBoundary::Word,
        ))
    }
}

/// Puts the leading verb of bullet and sentence lines into the past tense
/// ("• Manage the team." → "• Managed the team.").
pub struct VerbTenseGenerator;

/// The line's bullet (if any) plus its first word, with the first word's
/// lowercase form and the byte offset of the prefix inside the line.
fn leading_word<'l>(line: &'l str, markers: &PunctuationConfig) -> Option<(usize, &'l str, &'l str)> {
    let content = line.trim_start();
    let indent = line.len() - content.len();
    let marker = markers
        .bullet_markers
        .iter()
        .find(|m| content.starts_with(m.as_str()))
        .map_or(0, |m| m.len());
    let after_marker = &content[marker..];
    let body = after_marker.trim_start();
    let word_start = marker + (after_marker.len() - body.len());
    let word_len = body.find(char::is_whitespace).unwrap_or(body.len());
    if word_len == 0 {
        return None;
    }
    let word = &content[word_start..word_start + word_len];
    Some((indent, &content[..word_start + word_len], word))
}

fn is_statement(line: &str, markers: &PunctuationConfig) -> bool {
    let content = line.trim();
    let bulleted = markers.bullet_markers.iter().any(|m| content.starts_with(m.as_str()));
    (bulleted || content.ends_with(['.', ':'])) && content.split_whitespace().count() > 1
}

impl CandidateGenerator for VerbTenseGenerator {
    fn name(&self) -> &'static str {
        "VerbTense"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<ReplacementCandidate>, GenerationError> {
        let text = ctx.text();
        let fixes = &ctx.rules.grammar.tense_fixes;
        let markers = &ctx.rules.punctuation;

        // Every line starting with a given prefix gets the same edit, so a
        // prefix only qualifies when each line it starts qualifies.
        let mut prefixes: Vec<(&str, bool)> = Vec::new();
        let mut targets: Vec<(usize, &str, String)> = Vec::new();
        for (line_start, line) in lines_with_offsets(text) {
            let Some((indent, prefix, word)) = leading_word(line, markers) else {
                continue;
            };
            let past = fixes
                .get(&word.to_lowercase())
                .filter(|_| word == word.to_lowercase() || word == capitalize_first(&word.to_lowercase()));
            let qualifies = past.is_some() && is_statement(line, markers);
            prefixes.push((prefix, qualifies));
            if let (true, Some(past)) = (qualifies, past) {
                let fixed = format!("{}{}", &prefix[..prefix.len() - word.len()], match_case(word, past));
                targets.push((line_start + indent, prefix, fixed));
            }
        }

        let mut candidates: Vec<ReplacementCandidate> = Vec::new();
        for (offset, prefix, fixed) in targets {
            if prefixes.iter().any(|(p, ok)| *p == prefix && !ok)
                || candidates.iter().any(|c| c.old_text == prefix)
            {
                continue;
            }
            candidates.push(ReplacementCandidate::new(prefix, fixed).at_line_start().at(offset));
        }
        Ok(candidates)
    }
}
