//! Error taxonomy for the improvement pipeline.
//!
//! Each stage has its own error type because each one is recovered at a
//! different level: generation errors are swallowed per generator,
//! application errors per block, document errors end the attempt.

use thiserror::Error;

/// A single candidate generator could not produce output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("annotations unavailable for this block")]
    AnnotationUnavailable,

    #[error("annotation oracle failed: {0}")]
    OracleFailed(String),

    #[error("invalid rule in {rule}: {reason}")]
    InvalidRule { rule: String, reason: String },
}

/// The structured backend could not write a block back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("block {0} does not exist in this document")]
    BlockOutOfRange(usize),

    #[error("block {block} cannot be rewritten: {reason}")]
    UnsupportedStructure { block: usize, reason: String },

    #[error("failed to rewrite XML for block {block}: {reason}")]
    Xml { block: usize, reason: String },
}

/// Extraction or serialization failed; the whole attempt is abandoned.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid DOCX package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed XML in {part}: {reason}")]
    Xml { part: String, reason: String },

    #[error("DOCX package is missing required part: {0}")]
    MissingPart(String),

    #[error("text encoding error: {0}")]
    Encoding(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

impl DocumentError {
    pub fn xml(part: &str, err: impl std::fmt::Display) -> Self {
        Self::Xml {
            part: part.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn pdf_not_supported() -> Self {
        Self::UnsupportedFormat(
            "PDF files are not supported for text improvements. Please convert to DOCX format."
                .to_string(),
        )
    }

    pub fn unsupported_extension(ext: &str) -> Self {
        Self::UnsupportedFormat(format!(
            "Unsupported file type: .{ext}. Please use DOCX or TXT files."
        ))
    }
}

/// Analysis cannot run on the given input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("resume text is empty")]
    EmptyText,
}
