//! Spreadsheet loading into [`RawTable`](crate::models::RawTable).

mod reader;

pub use reader::{read_csv, read_sheet, read_workbook, SheetFormat};

use crate::error::SheetError;

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;
