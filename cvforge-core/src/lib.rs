// cvforge Core Library
//
// Résumé rewriting: candidate generation over rule tables, greedy
// longest-first conflict resolution, and block-level write-back into
// TXT and DOCX documents. PDF input is analyzed but never rewritten.
// Analysis reports can be turned into written recommendations.

pub mod types;
pub mod error;
pub mod config;
pub mod annotation;
pub mod generators;
pub mod rewrite;
pub mod documents;
pub mod analysis;
pub mod feedback;
pub mod improver;

// Re-export main types and functions for easy use
pub use types::*;
pub use error::{AnalysisError, ApplicationError, DocumentError, GenerationError};
pub use config::RuleBook;
pub use annotation::{AnnotationOracle, LexiconTagger, UnavailableOracle};
pub use generators::{CandidateGenerator, DebugConfig, GenerationContext, GeneratorRegistry};
pub use rewrite::{aggregate, apply_edits, resolve, Resolution};
pub use documents::{open_document, DocxDocument, EditableDocument, TextDocument};
pub use analysis::{analyze, AnalysisReport};
pub use feedback::{feedback, FeedbackReport, FeedbackSection};
pub use improver::{ImprovementOutcome, ImprovementReport, PipelineTimings, ResumeImprover, Stage};
