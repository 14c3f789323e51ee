//! Writers for canonical rows: xlsx workbooks, CSV and JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{RemitError, Result};
use crate::models::row::{CanonicalRow, Field};

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Single-sheet xlsx workbook with a header row of column labels.
    #[default]
    Xlsx,
    /// CSV with a header row of column labels.
    Csv,
    /// JSON array of objects keyed by column label.
    Json,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Name of the worksheet written by [`write_xlsx`].
pub const SHEET_NAME: &str = "Remittance";

/// Write rows to an xlsx workbook at `path`. Amounts are stored as numbers,
/// everything else as text; absent values leave the cell blank.
pub fn write_xlsx(path: &Path, columns: &[Field], rows: &[CanonicalRow]) -> Result<()> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = book
        .new_sheet(SHEET_NAME)
        .map_err(|e| RemitError::Xlsx(e.to_string()))?;

    for (c, field) in columns.iter().enumerate() {
        let col = c as u32 + 1;
        sheet.get_cell_mut((col, 1)).set_value_string(field.label());

        for (r, row) in rows.iter().enumerate() {
            let Some(value) = row.get(*field) else {
                continue;
            };
            let cell = sheet.get_cell_mut((col, r as u32 + 2));
            match (field, value.parse::<f64>()) {
                (Field::Amount, Ok(number)) => cell.set_value_number(number),
                _ => cell.set_value_string(value),
            };
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| RemitError::Xlsx(e.to_string()))?;
    Ok(())
}

/// Write rows as CSV, projected onto `columns` in order.
pub fn write_csv<W: Write>(writer: W, columns: &[Field], rows: &[CanonicalRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(|f| f.label()))?;
    for row in rows {
        csv.write_record(row.project(columns))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write rows as a pretty JSON array. Absent values are `null`.
pub fn write_json<W: Write>(writer: W, columns: &[Field], rows: &[CanonicalRow]) -> Result<()> {
    let records: Vec<Value> = rows
        .iter()
        .map(|row| {
            let record: Map<String, Value> = columns
                .iter()
                .map(|&f| {
                    let value = row
                        .get(f)
                        .map(|v| Value::String(v.to_string()))
                        .unwrap_or(Value::Null);
                    (f.label().to_string(), value)
                })
                .collect();
            Value::Object(record)
        })
        .collect();

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Write rows to `path` in the given format.
pub fn write_rows(
    path: &Path,
    format: OutputFormat,
    columns: &[Field],
    rows: &[CanonicalRow],
) -> Result<()> {
    match format {
        OutputFormat::Xlsx => write_xlsx(path, columns, rows)?,
        OutputFormat::Csv => write_csv(File::create(path)?, columns, rows)?,
        OutputFormat::Json => write_json(File::create(path)?, columns, rows)?,
    }
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
