//! Core library for remittance advice normalization.
//!
//! This crate provides:
//! - Spreadsheet and PDF text loading
//! - Header synonym resolution and data-region location
//! - Per-partner extractors (fixed-position, credit-range, PDF text, generic)
//! - Canonical row output as CSV or JSON

pub mod error;
pub mod models;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod remittance;
pub mod sheet;

pub use error::{ExtractionError, PdfError, RemitError, Result, SheetError};
pub use models::{CanonicalRow, Cell, Field, Layout, PartnerRoute, RawTable, RemitConfig};
pub use output::{write_csv, write_json, write_rows, write_xlsx, OutputFormat};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::{load_document, Pipeline, ProcessOutcome};
pub use remittance::{Document, ExtractorRegistry, RemittanceExtractor, Selection};
