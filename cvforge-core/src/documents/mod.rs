//! Document backends
//!
//! Every editable format exposes the same view: an ordered list of
//! [`TextBlock`]s that can be written back one at a time, then serialized.
//!
//! ```text
//! bytes (TXT / DOCX)
//!     ↓
//! [EditableDocument]  blocks() → rewrite → write_block()
//!     ↓
//! serialize() → bytes
//! ```
//!
//! - `TextDocument` - plain text, one block per line
//! - `DocxDocument` - WordprocessingML package, one block per top-level paragraph
//! - `extract_pdf_text` - PDF text for analysis only

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::DocxDocument;
pub use pdf::extract_pdf_text;
pub use text::{TextDocument, TextEncoding};

use crate::error::{ApplicationError, DocumentError};
use crate::types::{DocumentFormat, TextBlock};
use std::path::Path;

/// A document whose text can be rewritten block by block.
pub trait EditableDocument {
    fn format(&self) -> DocumentFormat;

    /// Blocks in document order; `blocks()[i].index == i`.
    fn blocks(&self) -> Vec<TextBlock>;

    /// Replace the full text of one block. On error the block is unchanged.
    fn write_block(&mut self, block: &TextBlock, text: &str) -> Result<(), ApplicationError>;

    fn serialize(&self) -> Result<Vec<u8>, DocumentError>;

    /// Whole-document text: blocks joined with `\n`.
    fn document_text(&self) -> String {
        self.blocks()
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format implied by a path's extension.
pub fn detect_format(path: &Path) -> Result<DocumentFormat, DocumentError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    DocumentFormat::from_extension(ext).ok_or_else(|| DocumentError::unsupported_extension(ext))
}

/// Parse in-memory bytes as an editable document of the given format.
pub fn load_document(
    format: DocumentFormat,
    bytes: &[u8],
) -> Result<Box<dyn EditableDocument>, DocumentError> {
    match format {
        DocumentFormat::Txt => Ok(Box::new(TextDocument::from_bytes(bytes)?)),
        DocumentFormat::Docx => Ok(Box::new(DocxDocument::from_bytes(bytes)?)),
        DocumentFormat::Pdf => Err(DocumentError::pdf_not_supported()),
    }
}

/// Open a file for rewriting. PDFs are rejected before they are read.
pub fn open_document(path: &Path) -> Result<Box<dyn EditableDocument>, DocumentError> {
    let format = detect_format(path)?;
    if !format.supports_rewrite() {
        return Err(DocumentError::pdf_not_supported());
    }
    let bytes = std::fs::read(path)?;
    load_document(format, &bytes)
}

/// Plain text of any supported file, PDF included.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let format = detect_format(path)?;
    let bytes = std::fs::read(path)?;
    match format {
        DocumentFormat::Pdf => extract_pdf_text(&bytes),
        other => Ok(load_document(other, &bytes)?.document_text()),
    }
}
