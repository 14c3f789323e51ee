//! Credit-range layout: header-resolved sheets where a "less credits" label
//! opens a block of credit lines that a "to pay" line closes.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::models::config::{HeaderConfig, MarkerConfig, RemitConfig};
use crate::models::row::{CanonicalRow, Field};
use crate::models::table::HeaderedTable;
use crate::remittance::rules::{
    amount_from_cell, contains_any_ignore_case, contains_ignore_case, format_amount, locate_region,
    HeaderMap,
};
use crate::remittance::{expect_table, Document, RemittanceExtractor, Result};

const COLUMNS: &[Field] = &[
    Field::InvoiceNumber,
    Field::Amount,
    Field::Cuin,
    Field::Date,
    Field::Remark,
];

/// Extractor for sheets with "less credits ... to pay" summary blocks and
/// continuation rows flagged in the remark column.
pub struct CreditRangeExtractor {
    headers: HeaderConfig,
    markers: MarkerConfig,
}

/// Row-walk state, local to one extraction.
#[derive(Debug, Default)]
struct WalkState {
    last_valid_invoice: Option<String>,
    last_valid_cuin: Option<String>,
    last_valid_date: Option<String>,
    in_credit_range: bool,
}

/// A retained row whose amount may still be adjusted by a continuation row.
#[derive(Debug)]
struct Retained {
    invoice_number: Option<String>,
    cuin: Option<String>,
    date: Option<String>,
    remark: Option<String>,
    amount: Option<Decimal>,
}

impl Retained {
    fn into_row(self) -> CanonicalRow {
        CanonicalRow {
            date: self.date,
            invoice_number: self.invoice_number,
            cuin: self.cuin,
            amount: self.amount.map(format_amount),
            remark: self.remark,
        }
    }
}

/// Resolved column positions for one sheet.
struct Columns {
    invoice: Option<usize>,
    amount: Option<usize>,
    cuin: Option<usize>,
    remark: Option<usize>,
    date: Option<usize>,
}

impl CreditRangeExtractor {
    pub fn new(headers: HeaderConfig, markers: MarkerConfig) -> Self {
        Self { headers, markers }
    }

    pub fn from_config(config: &RemitConfig) -> Self {
        Self::new(config.headers.clone(), config.markers.clone())
    }

    fn is_begin(&self, text: &str) -> bool {
        contains_any_ignore_case(text, &self.markers.credit_range_begin)
    }

    fn is_end(&self, text: &str) -> bool {
        contains_ignore_case(text, &self.markers.credit_range_end)
    }

    fn walk(&self, view: &HeaderedTable<'_>, cols: &Columns) -> Result<Vec<Retained>> {
        let mut state = WalkState::default();
        let mut rows: Vec<Retained> = Vec::new();

        for i in 0..view.body.len() {
            let invoice = view.cell(i, cols.invoice).as_text();
            let invoice_text = invoice.as_deref().unwrap_or_default();
            let amount_cell = view.cell(i, cols.amount);
            let cuin = view.cell(i, cols.cuin).as_text();
            let remark = view.cell(i, cols.remark).as_text();
            let date = view.cell(i, cols.date).as_text();

            let is_begin = self.is_begin(invoice_text);
            let is_end = self.is_end(invoice_text);

            if is_begin {
                state.in_credit_range = true;
            }
            let in_range_with_amount = state.in_credit_range && !amount_cell.is_empty();
            if is_end {
                state.in_credit_range = false;
            }

            // Inside a credit block the source sign is trusted as is
            if in_range_with_amount {
                trace!("Row {}: credit block line {:?}", i, invoice);
                rows.push(Retained {
                    invoice_number: invoice.clone(),
                    cuin: cuin.clone(),
                    date: date.clone(),
                    remark: remark.clone(),
                    amount: amount_from_cell(amount_cell)?,
                });
            }

            // Labelled rows are kept whether or not a credit block is open
            if invoice.is_some() && !is_begin && !is_end {
                state.last_valid_invoice = invoice.clone();
                state.last_valid_cuin = cuin.clone();
                state.last_valid_date = date.clone();
                rows.push(Retained {
                    invoice_number: invoice,
                    cuin,
                    date,
                    remark,
                    amount: amount_from_cell(amount_cell)?,
                });
                continue;
            }

            let is_continuation = invoice.is_none()
                && !amount_cell.is_empty()
                && remark.as_deref() == Some(self.markers.continuation_remark.as_str());

            if is_continuation && state.last_valid_invoice.is_some() {
                let delta = amount_from_cell(amount_cell)?.unwrap_or_default();
                if let Some(previous) = rows.last_mut() {
                    previous.amount = Some(previous.amount.unwrap_or_default() + delta);
                }
                trace!("Row {}: continuation of {:?} by {}", i, state.last_valid_invoice, delta);
                rows.push(Retained {
                    invoice_number: state.last_valid_invoice.clone(),
                    cuin: state.last_valid_cuin.clone(),
                    date: state.last_valid_date.clone(),
                    remark,
                    amount: Some(delta),
                });
                continue;
            }

            if !in_range_with_amount {
                trace!("Row {}: dropped", i);
            }
        }

        Ok(rows)
    }

    /// Remove "to pay" rows with the label row just above them, and the rows
    /// that opened a credit block.
    fn strip_markers(&self, rows: Vec<Retained>) -> Vec<Retained> {
        let mut drop = BTreeSet::new();

        for (i, row) in rows.iter().enumerate() {
            let text = row.invoice_number.as_deref().unwrap_or_default();
            if self.is_end(text) {
                drop.insert(i.saturating_sub(1));
                drop.insert(i);
            } else if self.is_begin(text) {
                drop.insert(i);
            }
        }

        debug!("Removing {} marker rows", drop.len());
        rows.into_iter()
            .enumerate()
            .filter(|(i, _)| !drop.contains(i))
            .map(|(_, row)| row)
            .collect()
    }
}

impl Default for CreditRangeExtractor {
    fn default() -> Self {
        Self::from_config(&RemitConfig::default())
    }
}

impl RemittanceExtractor for CreditRangeExtractor {
    fn name(&self) -> &'static str {
        "credit-range"
    }

    fn columns(&self) -> &'static [Field] {
        COLUMNS
    }

    fn extract(&self, document: &Document) -> Result<Vec<CanonicalRow>> {
        let table = expect_table(self.name(), document)?;
        let start = locate_region(table, &self.markers.region_start);
        let view = table.with_header_at(start);

        let map = HeaderMap::resolve(&view.headers, &self.headers, COLUMNS);
        let cols = Columns {
            invoice: Some(required(&map, Field::InvoiceNumber)?),
            amount: Some(required(&map, Field::Amount)?),
            cuin: map.column(Field::Cuin),
            remark: map.column(Field::Remark),
            date: map.column(Field::Date),
        };

        let retained = self.walk(&view, &cols)?;
        let rows: Vec<CanonicalRow> = self
            .strip_markers(retained)
            .into_iter()
            .map(Retained::into_row)
            .collect();

        debug!("Credit-range walk kept {} of {} rows", rows.len(), view.body.len());
        Ok(rows)
    }
}

fn required(map: &HeaderMap, field: Field) -> Result<usize> {
    map.column(field).ok_or(ExtractionError::MissingColumn(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::{Cell, RawTable};
    use pretty_assertions::assert_eq;

    fn r(invoice: &str, amount: Cell, cuin: &str, remark: &str) -> Vec<Cell> {
        vec![
            "2024-08-01".into(),
            invoice.into(),
            cuin.into(),
            amount,
            remark.into(),
        ]
    }

    fn table(rows: Vec<Vec<Cell>>) -> Document {
        let mut all = vec![
            vec!["CHANDARANA SUPERMARKET".into()],
            vec![
                "Date".into(),
                "Invoice".into(),
                "CUIN Number".into(),
                "Original".into(),
                "Remark".into(),
            ],
        ];
        all.extend(rows);
        Document::Table(RawTable::new(all))
    }

    fn invoices(rows: &[CanonicalRow]) -> Vec<(Option<&str>, Option<&str>)> {
        rows.iter()
            .map(|r| (r.invoice_number.as_deref(), r.amount.as_deref()))
            .collect()
    }

    #[test]
    fn test_credit_block_is_kept_and_markers_removed() {
        let doc = table(vec![
            r("1001", 1000.0.into(), "C1", ""),
            r("1002", 2000.0.into(), "C2", ""),
            r("Less Credits", Cell::Empty, "", ""),
            r("", (-100.0).into(), "CN1", ""),
            r("", (-50.0).into(), "CN2", ""),
            r("Total credits", (-150.0).into(), "", ""),
            r("To Pay", 2850.0.into(), "", ""),
        ]);

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();

        assert_eq!(
            invoices(&rows),
            vec![
                (Some("1001"), Some("1000.00")),
                (Some("1002"), Some("2000.00")),
                (None, Some("-100.00")),
                (None, Some("-50.00")),
                (Some("Total credits"), Some("-150.00")),
            ]
        );
        assert_eq!(rows[2].cuin.as_deref(), Some("CN1"));
    }

    #[test]
    fn test_amount_only_credit_lines_are_kept() {
        let doc = table(vec![
            r("1001", 1000.0.into(), "C1", ""),
            r("Less Credits", Cell::Empty, "", ""),
            r("", (-100.0).into(), "", ""),
            r("", (-50.0).into(), "", ""),
            r("Total credits", (-150.0).into(), "", ""),
            r("To Pay", 850.0.into(), "", ""),
        ]);

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert_eq!(
            invoices(&rows),
            vec![
                (Some("1001"), Some("1000.00")),
                (None, Some("-100.00")),
                (None, Some("-50.00")),
                (Some("Total credits"), Some("-150.00")),
            ]
        );
        assert_eq!(rows[1].cuin, None);
    }

    #[test]
    fn test_labelled_credit_line_is_kept_twice() {
        let doc = table(vec![
            r("1001", 1000.0.into(), "C1", ""),
            r("Less Credits", Cell::Empty, "", ""),
            r("CN55", (-30.0).into(), "X9", ""),
            r("Total credits", (-30.0).into(), "", ""),
            r("To Pay", 970.0.into(), "", ""),
        ]);

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert_eq!(
            invoices(&rows),
            vec![
                (Some("1001"), Some("1000.00")),
                (Some("CN55"), Some("-30.00")),
                (Some("CN55"), Some("-30.00")),
                (Some("Total credits"), Some("-30.00")),
            ]
        );
        assert_eq!(rows[2].cuin.as_deref(), Some("X9"));
    }

    #[test]
    fn test_begin_row_with_amount_is_removed() {
        let doc = table(vec![
            r("1001", 500.0.into(), "C1", ""),
            r("LESS RETURNS", (-20.0).into(), "R1", ""),
            r("", (-5.0).into(), "R2", ""),
            r("Subtotal", (-25.0).into(), "", ""),
            r("to pay", 475.0.into(), "", ""),
            r("1002", 10.0.into(), "C3", ""),
        ]);

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert_eq!(
            invoices(&rows),
            vec![
                (Some("1001"), Some("500.00")),
                (None, Some("-5.00")),
                (Some("Subtotal"), Some("-25.00")),
                (Some("1002"), Some("10.00")),
            ]
        );
    }

    #[test]
    fn test_continuation_row_updates_previous_and_duplicates_delta() {
        let doc = table(vec![
            r("1001", 100.0.into(), "C1", ""),
            r("", 15.5.into(), "", "ss"),
        ]);

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].amount.as_deref(), Some("115.50"));
        assert_eq!(rows[1].invoice_number.as_deref(), Some("1001"));
        assert_eq!(rows[1].cuin.as_deref(), Some("C1"));
        assert_eq!(rows[1].date.as_deref(), Some("2024-08-01"));
        assert_eq!(rows[1].amount.as_deref(), Some("15.50"));
        assert_eq!(rows[1].remark.as_deref(), Some("ss"));
    }

    #[test]
    fn test_continuation_remark_is_exact() {
        let doc = table(vec![
            r("1001", 100.0.into(), "C1", ""),
            r("", 15.0.into(), "", "SS"),
            r("", 15.0.into(), "", "ss "),
        ]);

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert_eq!(invoices(&rows), vec![(Some("1001"), Some("100.00"))]);
    }

    #[test]
    fn test_continuation_before_any_invoice_is_dropped() {
        let doc = table(vec![r("", 15.0.into(), "", "ss")]);
        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_invoice_header() {
        let doc = Document::Table(RawTable::new(vec![
            vec!["Date".into(), "Original".into()],
            vec!["2024-08-01".into(), 10.0.into()],
        ]));

        let err = CreditRangeExtractor::default().extract(&doc).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::MissingColumn(Field::InvoiceNumber)
        ));
    }

    #[test]
    fn test_missing_cuin_column_is_tolerated() {
        let doc = Document::Table(RawTable::new(vec![
            vec!["Date".into(), "Invoice".into(), "Net Pay".into()],
            vec!["2024-08-01".into(), "1001".into(), 10.0.into()],
        ]));

        let rows = CreditRangeExtractor::default().extract(&doc).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cuin, None);
        assert_eq!(rows[0].remark, None);
    }
}
