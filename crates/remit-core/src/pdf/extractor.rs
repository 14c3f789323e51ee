//! PDF parsing with lopdf and text extraction with pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Reads remittance text out of a PDF.
#[derive(Debug, Default)]
pub struct PdfExtractor {
    pages: u32,
    /// Bytes handed to pdf-extract; the decrypted copy for protected files.
    readable: Option<Vec<u8>>,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.readable.is_some()
    }
}

/// Decrypt with the empty password and re-serialize, so that pdf-extract
/// sees a plain document.
fn decrypted_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    doc.decrypt("").map_err(|_| PdfError::Encrypted)?;

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| PdfError::Parse(format!("cannot re-save decrypted PDF: {}", e)))?;
    debug!("Decrypted PDF with empty password");
    Ok(out)
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let pages = doc.get_pages().len() as u32;
        if pages == 0 {
            return Err(PdfError::NoPages);
        }

        let readable = if doc.is_encrypted() {
            decrypted_bytes(&mut doc)?
        } else {
            data.to_vec()
        };

        debug!("Loaded PDF with {} pages", pages);
        self.pages = pages;
        self.readable = Some(readable);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.pages
    }

    fn extract_text(&self) -> Result<String> {
        let bytes = self
            .readable
            .as_deref()
            .ok_or_else(|| PdfError::Parse("no document loaded".to_string()))?;

        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        if text.trim().is_empty() {
            warn!("PDF has no text layer; scanned remittances cannot be read");
        } else {
            debug!("Extracted {} chars from {} pages", text.len(), self.pages);
        }
        Ok(text)
    }
}

/// Read a PDF file and return its text.
pub fn read_pdf_text(path: &Path) -> crate::Result<String> {
    let data = std::fs::read(path)?;
    let mut pdf = PdfExtractor::new();
    pdf.load(&data)?;
    Ok(pdf.extract_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_loaded() {
        let pdf = PdfExtractor::new();
        assert!(!pdf.is_loaded());
        assert_eq!(pdf.page_count(), 0);
        assert!(matches!(pdf.extract_text(), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut pdf = PdfExtractor::new();
        assert!(matches!(pdf.load(b"not a pdf"), Err(PdfError::Parse(_))));
        assert!(!pdf.is_loaded());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_pdf_text(Path::new("/nonexistent/advice.pdf")).unwrap_err();
        assert!(matches!(err, crate::RemitError::Io(_)));
    }
}
