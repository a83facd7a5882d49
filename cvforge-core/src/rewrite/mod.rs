// Replacement core: pool candidates, resolve conflicts, apply edits.
// - aggregate.rs: merge generator outputs into one deduplicated pool
// - resolver.rs: greedy longest-first sweep over occurrence intervals
// - applier.rs: flat-text splice and per-block document write-back

pub mod aggregate;
pub mod applier;
pub mod resolver;

pub use aggregate::{aggregate, Aggregation, GeneratorOutput};
pub use applier::{apply_edits, apply_to_document, ApplyReport, BlockOutcome, BlockPlan};
pub use resolver::{resolve, Resolution};
