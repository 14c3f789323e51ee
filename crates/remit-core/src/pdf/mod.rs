//! Text extraction for remittances delivered as PDF.

mod extractor;

pub use extractor::{read_pdf_text, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A source of PDF text.
pub trait PdfProcessor {
    /// Parse the document, decrypting it when it only has an empty password.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Pages in the loaded document, 0 before [`load`](Self::load).
    fn page_count(&self) -> u32;

    /// Text of all pages, in page order.
    fn extract_text(&self) -> Result<String>;
}
