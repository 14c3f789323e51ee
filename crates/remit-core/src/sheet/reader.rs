//! First-worksheet readers for workbooks (calamine) and CSV files (csv).

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::Result;
use crate::error::SheetError;
use crate::models::table::{Cell, RawTable};

/// Spreadsheet formats accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`.
    Workbook,
    /// Comma-separated text.
    Csv,
}

impl SheetFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(SheetFormat::Workbook),
            "csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }
}

/// Read the first sheet of any supported spreadsheet file.
pub fn read_sheet(path: &Path) -> Result<RawTable> {
    match SheetFormat::from_path(path) {
        Some(SheetFormat::Workbook) => read_workbook(path),
        Some(SheetFormat::Csv) => read_csv(path),
        None => Err(SheetError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read the first worksheet of a workbook.
///
/// Cells keep their sheet coordinates: leading empty rows and columns are
/// padded back so fixed column positions stay valid.
pub fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SheetError::Open(e.to_string()))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoSheet)?;
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| SheetError::Open(e.to_string()))?;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(cell_from_data));
        rows.push(cells);
    }

    debug!(
        "Read sheet {:?} from {}: {} rows",
        first,
        path.display(),
        rows.len()
    );
    Ok(RawTable::new(rows))
}

/// Read a CSV file. No row is treated as a header; ragged rows are allowed.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::text).collect());
    }

    debug!("Read {} CSV rows from {}", rows.len(), path.display());
    Ok(RawTable::new(rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::Date(value),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::text(s.as_str())),
        Data::DurationIso(s) => Cell::text(s.as_str()),
        Data::Error(e) => {
            warn!("Cell error in sheet: {:?}", e);
            Cell::Empty
        }
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
