//! Error types for the remit-core library.

use thiserror::Error;

use crate::models::row::Field;

/// Main error type for the remit library.
#[derive(Error, Debug)]
pub enum RemitError {
    /// Spreadsheet reading error.
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Remittance extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Output writing error.
    #[error("output error: {0}")]
    Output(#[from] csv::Error),

    /// xlsx workbook writing error.
    #[error("xlsx error: {0}")]
    Xlsx(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading spreadsheet files.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Failed to open the workbook.
    #[error("failed to open workbook: {0}")]
    Open(String),

    /// The workbook has no worksheet to read.
    #[error("workbook has no worksheets")]
    NoSheet,

    /// Failed to read a CSV file.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is not a known spreadsheet format.
    #[error("unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while walking a remittance document.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A canonical field the extractor depends on has no matching header.
    #[error("could not find required column: {0}")]
    MissingColumn(Field),

    /// An amount cell is present but is not a number.
    #[error("invalid amount: {value:?}")]
    Format { value: String },

    /// The extractor cannot handle this kind of document.
    #[error("{extractor} cannot read {found} input")]
    UnsupportedInput {
        extractor: &'static str,
        found: &'static str,
    },
}

/// Result type for the remit library.
pub type Result<T> = std::result::Result<T, RemitError>;
