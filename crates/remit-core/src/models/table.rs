//! Raw tabular data as read from a partner spreadsheet.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

static EMPTY: Cell = Cell::Empty;

/// A single cell of a raw sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell.
    Empty,
    /// Text content.
    Text(String),
    /// Numeric content (integers are stored as whole floats).
    Number(f64),
    /// Boolean content.
    Bool(bool),
    /// Date or date-time content.
    Date(NaiveDateTime),
}

impl Cell {
    /// Build a text cell, mapping the empty string to [`Cell::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    /// Whether the cell carries no value. Whitespace-only text counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text form of the cell, `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => {
                // Whole numbers print without the trailing ".0"
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Date(dt) => {
                if dt.time() == NaiveTime::MIN {
                    write!(f, "{}", dt.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Date(value)
    }
}

/// An ordered grid of cells with no assumed header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Create a table from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the cell at a position; missing cells read as [`Cell::Empty`].
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Split the table at `header_row`: the row's text forms become the header
    /// labels and the rows below it become the body.
    pub fn with_header_at(&self, header_row: usize) -> HeaderedTable<'_> {
        let headers = self
            .rows
            .get(header_row)
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();
        let body = self.rows.get(header_row + 1..).unwrap_or(&[]);

        HeaderedTable { headers, body }
    }
}

/// A view over a [`RawTable`] with a resolved header row.
#[derive(Debug, Clone)]
pub struct HeaderedTable<'a> {
    /// Header labels by column index.
    pub headers: Vec<String>,
    /// Data rows following the header row.
    pub body: &'a [Vec<Cell>],
}

impl HeaderedTable<'_> {
    /// Cell in a body row, `Empty` when the row is short or the column is absent.
    pub fn cell(&self, row: usize, col: Option<usize>) -> &Cell {
        col.and_then(|c| self.body.get(row).and_then(|r| r.get(c)))
            .unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_text_forms() {
        assert_eq!(Cell::Number(12345.0).to_string(), "12345");
        assert_eq!(Cell::Number(100.5).to_string(), "100.5");
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Bool(true).to_string(), "true");

        let date = NaiveDate::from_ymd_opt(2024, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(date).to_string(), "2024-08-01");
    }

    #[test]
    fn test_whitespace_text_is_empty() {
        assert!(Cell::text("   ").is_empty());
        assert_eq!(Cell::text(""), Cell::Empty);
        assert_eq!(Cell::text(" x ").as_text(), Some(" x ".to_string()));
    }

    #[test]
    fn test_with_header_at() {
        let table = RawTable::new(vec![
            vec!["Remittance".into()],
            vec!["Invoice".into(), "Amount".into()],
            vec!["1001".into(), 50.0.into()],
        ]);

        let view = table.with_header_at(1);
        assert_eq!(view.headers, vec!["Invoice", "Amount"]);
        assert_eq!(view.body.len(), 1);
        assert_eq!(view.cell(0, Some(1)), &Cell::Number(50.0));
        assert_eq!(view.cell(0, Some(7)), &Cell::Empty);
        assert_eq!(view.cell(0, None), &Cell::Empty);
    }

    #[test]
    fn test_header_past_end_yields_empty_view() {
        let table = RawTable::new(vec![vec!["a".into()]]);
        let view = table.with_header_at(3);
        assert!(view.headers.is_empty());
        assert!(view.body.is_empty());
    }
}
