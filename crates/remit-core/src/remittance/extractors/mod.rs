//! Per-partner extractors.

mod credit_range;
mod fixed_position;
mod generic;
mod pdf_text;

pub use credit_range::CreditRangeExtractor;
pub use fixed_position::FixedPositionExtractor;
pub use generic::GenericExtractor;
pub use pdf_text::PdfTextExtractor;
