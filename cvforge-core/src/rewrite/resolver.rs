//! Greedy longest-first conflict resolution.
//!
//! Every occurrence of every candidate becomes a provisional interval against
//! one immutable snapshot of the block text. Intervals are ordered by start
//! offset, then length (longest first), then candidate index, and swept left
//! to right: an interval is kept only if it starts at or after the end of the
//! last kept one.

use crate::types::{ReplacementCandidate, ResolvedEdit};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Disjoint, ascending edits
    pub edits: Vec<ResolvedEdit>,
    /// Occurrences dropped because they overlapped a kept edit
    pub discarded: usize,
    /// Candidates with no acceptable occurrence in the text
    pub unmatched: usize,
}

#[derive(Debug, Clone, Copy)]
struct Interval {
    start: usize,
    end: usize,
    key: usize,
}

impl Interval {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn priority(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| other.len().cmp(&self.len()))
            .then_with(|| self.key.cmp(&other.key))
    }
}

/// Resolve a candidate pool against `text`. The candidate's position in
/// `candidates` is its tie-break key.
pub fn resolve(text: &str, candidates: &[ReplacementCandidate]) -> Resolution {
    let mut intervals: Vec<Interval> = Vec::new();
    let mut unmatched = 0;

    for (key, candidate) in candidates.iter().enumerate() {
        if candidate.old_text.is_empty() {
            unmatched += 1;
            continue;
        }
        let before = intervals.len();
        // match_indices yields non-overlapping occurrences, left to right
        for (start, matched) in text.match_indices(candidate.old_text.as_str()) {
            let end = start + matched.len();
            if candidate.boundary.accepts(text, start, end) {
                intervals.push(Interval { start, end, key });
            }
        }
        if intervals.len() == before {
            unmatched += 1;
        }
    }

    intervals.sort_by(Interval::priority);

    let mut edits: Vec<ResolvedEdit> = Vec::new();
    let mut last_end = 0;
    let mut discarded = 0;
    for interval in intervals {
        if interval.start >= last_end {
            last_end = interval.end;
            edits.push(ResolvedEdit {
                start: interval.start,
                end: interval.end,
                replacement: candidates[interval.key].new_text.clone(),
            });
        } else {
            discarded += 1;
        }
    }

    Resolution {
        edits,
        discarded,
        unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::apply_edits;

    fn cand(old: &str, new: &str) -> ReplacementCandidate {
        ReplacementCandidate::new(old, new)
    }

    fn assert_disjoint_ascending(edits: &[ResolvedEdit]) {
        for pair in edits.windows(2) {
            assert!(pair[0].end <= pair[1].start, "overlap: {pair:?}");
        }
    }

    #[test]
    fn test_longest_match_precedence() {
        let text = "I was responsible for sales";
        let resolution = resolve(text, &[cand("for", "X"), cand("responsible for", "Y")]);
        assert_eq!(resolution.edits.len(), 1);
        assert_eq!(resolution.edits[0].replacement, "Y");
        assert_eq!(&text[resolution.edits[0].start..resolution.edits[0].end], "responsible for");
        assert_eq!(resolution.discarded, 1);
        assert_eq!(apply_edits(text, &resolution.edits), "I was Y sales");
    }

    #[test]
    fn test_same_start_prefers_longer() {
        let text = "very responsible for";
        let resolution = resolve(text, &[cand("very", ""), cand("very responsible", "accountable")]);
        assert_eq!(resolution.edits.len(), 1);
        assert_eq!(resolution.edits[0].replacement, "accountable");
    }

    #[test]
    fn test_registration_order_tie_break() {
        let text = "Helped the team";
        let resolution = resolve(text, &[cand("Helped", "Facilitated"), cand("Helped", "Supported")]);
        assert_eq!(resolution.edits.len(), 1);
        assert_eq!(resolution.edits[0].replacement, "Facilitated");
        assert_eq!(resolution.discarded, 1);
    }

    #[test]
    fn test_missing_occurrence_is_silent() {
        let resolution = resolve("Led a team", &[cand("responsible for", "spearheaded")]);
        assert!(resolution.edits.is_empty());
        assert_eq!(resolution.unmatched, 1);
    }

    #[test]
    fn test_all_occurrences_replaced_without_chaining() {
        let text = "A then B then A";
        let resolution = resolve(text, &[cand("A", "B"), cand("B", "C")]);
        assert_eq!(apply_edits(text, &resolution.edits), "B then C then B");
    }

    #[test]
    fn test_word_boundary_guard() {
        let text = "Scheduled releases and led reviews";
        let resolution = resolve(text, &[cand("led", "directed").whole_word()]);
        assert_eq!(resolution.edits.len(), 1);
        assert_eq!(apply_edits(text, &resolution.edits), "Scheduled releases and directed reviews");
    }

    #[test]
    fn test_phrase_upgrade_scenario() {
        let text = "I was responsible for sales and marketing.";
        let resolution = resolve(text, &[cand("responsible for", "spearheaded")]);
        assert_eq!(
            apply_edits(text, &resolution.edits),
            "I was spearheaded sales and marketing."
        );
    }

    #[test]
    fn test_deletion_cleanup() {
        let text = "a very good plan";
        let resolution = resolve(text, &[cand(" very ", " ")]);
        assert_eq!(apply_edits(text, &resolution.edits), "a good plan");
    }

    // Small deterministic LCG so the invariant checks cover many pools
    // without pulling in a property-testing crate.
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: usize) -> usize {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 33) as usize) % bound
        }
    }

    #[test]
    fn test_non_overlap_and_conservation_over_random_pools() {
        let words = ["led", "team", "very", "good", "responsible", "for", "sales", "é", "and"];
        let mut rng = Lcg(42);

        for _ in 0..200 {
            let text: String = (0..12)
                .map(|_| words[rng.next(words.len())])
                .collect::<Vec<_>>()
                .join(" ");
            let candidates: Vec<ReplacementCandidate> = (0..6)
                .map(|_| {
                    let len = 1 + rng.next(3);
                    let start = rng.next(12 - len);
                    let old = text.split(' ').skip(start).take(len).collect::<Vec<_>>().join(" ");
                    let new = if rng.next(4) == 0 { String::new() } else { format!("<{}>", rng.next(100)) };
                    ReplacementCandidate::new(old, new)
                })
                .collect();

            let resolution = resolve(&text, &candidates);
            assert_disjoint_ascending(&resolution.edits);

            let rewritten = apply_edits(&text, &resolution.edits);
            let removed: usize = resolution.edits.iter().map(|e| e.end - e.start).sum();
            let inserted: usize = resolution.edits.iter().map(|e| e.replacement.len()).sum();
            assert_eq!(rewritten.len(), text.len() - removed + inserted);

            // untouched segments survive byte-identical, in order
            let mut cursor = 0;
            let mut out_cursor = 0;
            for edit in &resolution.edits {
                let kept = &text[cursor..edit.start];
                assert_eq!(&rewritten[out_cursor..out_cursor + kept.len()], kept);
                out_cursor += kept.len() + edit.replacement.len();
                cursor = edit.end;
            }
            assert_eq!(&rewritten[out_cursor..], &text[cursor..]);
        }
    }
}
