use crate::error::GenerationError;
use crate::types::ReplacementCandidate;
use std::collections::HashSet;
use std::time::Duration;

/// What one generator returned for one block.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    pub generator: String,
    pub result: Result<Vec<ReplacementCandidate>, GenerationError>,
    /// Time spent inside `generate`; zero when nobody measured it
    pub elapsed: Duration,
}

impl GeneratorOutput {
    pub fn new(
        generator: impl Into<String>,
        result: Result<Vec<ReplacementCandidate>, GenerationError>,
    ) -> Self {
        Self {
            generator: generator.into(),
            result,
            elapsed: Duration::ZERO,
        }
    }

    pub fn timed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Candidates returned, counting a failure as none.
    pub fn candidate_count(&self) -> usize {
        self.result.as_ref().map_or(0, Vec::len)
    }
}

/// Pooled candidates for one block plus bookkeeping for the run report.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Valid, deduplicated candidates in first-seen order; the index is the
    /// resolver's tie-break key
    pub candidates: Vec<ReplacementCandidate>,
    pub failed_generators: Vec<String>,
    pub dropped_invalid: usize,
    pub duplicates: usize,
}

impl Aggregation {
    pub fn collect(outputs: Vec<GeneratorOutput>) -> Self {
        let mut aggregation = Self::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for output in outputs {
            let candidates = match output.result {
                Ok(candidates) => candidates,
                Err(err) => {
                    tracing::warn!(
                        generator = %output.generator,
                        "generator failed, contributing no candidates: {err}"
                    );
                    aggregation.failed_generators.push(output.generator);
                    continue;
                }
            };

            for candidate in candidates {
                if !candidate.is_valid() {
                    tracing::trace!(generator = %output.generator, "dropping invalid candidate {candidate}");
                    aggregation.dropped_invalid += 1;
                    continue;
                }
                let key = (candidate.old_text.clone(), candidate.new_text.clone());
                if seen.insert(key) {
                    aggregation.candidates.push(candidate);
                } else {
                    aggregation.duplicates += 1;
                }
            }
        }
        aggregation
    }
}

/// Concatenate generator outputs in order, treating errors as empty lists,
/// dropping invalid candidates and `(old_text, new_text)` duplicates.
pub fn aggregate(outputs: Vec<GeneratorOutput>) -> Vec<ReplacementCandidate> {
    Aggregation::collect(outputs).candidates
}
