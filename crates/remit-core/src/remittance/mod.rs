//! Remittance advice extraction: per-partner extractors over raw sheets and
//! PDF text, plus the registry that routes files to them.

mod extractors;
mod registry;
pub mod rules;

pub use extractors::{
    CreditRangeExtractor, FixedPositionExtractor, GenericExtractor, PdfTextExtractor,
};
pub use registry::{ExtractorRegistry, Selection};

use crate::error::ExtractionError;
use crate::models::row::{CanonicalRow, Field};
use crate::models::table::RawTable;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Input handed to an extractor.
#[derive(Debug, Clone)]
pub enum Document {
    /// First worksheet of a spreadsheet.
    Table(RawTable),
    /// Full text extracted from a PDF.
    Text(String),
}

impl Document {
    /// Short name of the document kind, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Table(_) => "spreadsheet",
            Document::Text(_) => "PDF text",
        }
    }
}

/// A partner-specific remittance layout.
pub trait RemittanceExtractor {
    /// Name of the layout, for logs and reports.
    fn name(&self) -> &'static str;

    /// Output columns, in order, for this layout.
    fn columns(&self) -> &'static [Field];

    /// Walk the document and produce canonical rows.
    fn extract(&self, document: &Document) -> Result<Vec<CanonicalRow>>;
}

/// Helper for extractors that only read spreadsheets.
pub(crate) fn expect_table<'a>(extractor: &'static str, document: &'a Document) -> Result<&'a RawTable> {
    match document {
        Document::Table(table) => Ok(table),
        other => Err(ExtractionError::UnsupportedInput {
            extractor,
            found: other.kind(),
        }),
    }
}
