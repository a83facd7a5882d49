// PDF text extraction. Analysis only: there is no PDF write-back.

use crate::error::DocumentError;

/// Extract the plain text of a PDF held in memory.
#[cfg(feature = "pdf")]
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| DocumentError::Pdf(e.to_string()))?;
    tracing::debug!("extracted {} bytes of text from PDF", text.len());
    Ok(text)
}

#[cfg(not(feature = "pdf"))]
pub fn extract_pdf_text(_bytes: &[u8]) -> Result<String, DocumentError> {
    Err(DocumentError::Pdf(
        "this build has no PDF backend (enable the `pdf` feature)".to_string(),
    ))
}
