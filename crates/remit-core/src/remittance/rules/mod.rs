//! Rule-based building blocks shared by the partner extractors.

pub mod amounts;
pub mod headers;
pub mod invoice_number;
pub mod patterns;
pub mod pdf_lines;
pub mod region;

pub use amounts::{amount_from_cell, apply_sign, format_amount, normalize_amount, parse_amount, Sign};
pub use headers::{resolve_header, resolve_index, HeaderMap};
pub use invoice_number::clean_invoice_number;
pub use patterns::{contains_any_ignore_case, contains_ignore_case};
pub use pdf_lines::{parse_pdf_lines, PdfLine};
pub use region::locate_region;
