//! Locating the header row inside a loosely structured sheet.

use tracing::debug;

use super::patterns::contains_any_ignore_case;
use crate::models::table::RawTable;

/// Index of the first row with a cell containing any marker
/// (case-insensitive substring).
///
/// Returns 0 when nothing matches; callers treat 0 as "no trimming needed",
/// not as a confirmed match.
pub fn locate_region<S: AsRef<str>>(table: &RawTable, markers: &[S]) -> usize {
    let found = table.rows().iter().position(|row| {
        row.iter()
            .any(|cell| contains_any_ignore_case(&cell.to_string(), markers))
    });

    match found {
        Some(index) => {
            debug!("Data region starts at row {}", index);
            index
        }
        None => {
            debug!("No region marker found, reading from the first row");
            0
        }
    }
}
