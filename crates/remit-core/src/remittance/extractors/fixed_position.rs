//! Fixed-position layout: columns addressed by position, credit notes in the
//! CUIN column attach a negative amount to the last valid invoice.

use tracing::{debug, trace};

use crate::remittance::rules::{
    amount_from_cell, apply_sign, clean_invoice_number, contains_any_ignore_case, format_amount, Sign,
};
use crate::remittance::{expect_table, Document, RemittanceExtractor, Result};
use crate::models::config::{FixedPositionConfig, RemitConfig};
use crate::models::row::{CanonicalRow, Field};
use crate::models::table::{Cell, RawTable};

const COLUMNS: &[Field] = &[Field::Date, Field::InvoiceNumber, Field::Cuin, Field::Amount];

/// Extractor for sheets with a fixed column layout and no usable header row.
pub struct FixedPositionExtractor {
    columns: FixedPositionConfig,
    credit_markers: Vec<String>,
}

/// Row-walk state, local to one extraction.
#[derive(Debug, Default)]
struct WalkState {
    last_valid_invoice: Option<String>,
    last_valid_cuin: Option<String>,
}

impl FixedPositionExtractor {
    pub fn new(columns: FixedPositionConfig, credit_markers: Vec<String>) -> Self {
        Self {
            columns,
            credit_markers,
        }
    }

    pub fn from_config(config: &RemitConfig) -> Self {
        Self::new(
            config.fixed_position.clone(),
            config.markers.credit_note.clone(),
        )
    }

    fn walk(&self, table: &RawTable) -> Result<Vec<CanonicalRow>> {
        let cols = &self.columns;
        let mut state = WalkState::default();
        let mut rows = Vec::new();

        for i in 0..table.len() {
            let date = table.cell(i, cols.date_column).as_text();
            let invoice_text = table.cell(i, cols.invoice_column).to_string();
            let cuin_cell = table.cell(i, cols.cuin_column);
            let cuin_text = cuin_cell.to_string();
            let amount_cell = table.cell(i, cols.amount_column);

            if let Some(invoice) = clean_invoice_number(&invoice_text) {
                let cuin = cuin_cell.as_text();
                rows.push(CanonicalRow {
                    date,
                    invoice_number: Some(invoice.clone()),
                    cuin: cuin.clone(),
                    amount: signed_amount(amount_cell, Sign::Positive)?,
                    remark: None,
                });
                state.last_valid_invoice = Some(invoice);
                state.last_valid_cuin = cuin;
                continue;
            }

            if contains_any_ignore_case(&cuin_text, &self.credit_markers) {
                if state.last_valid_invoice.is_none() && state.last_valid_cuin.is_none() {
                    debug!("Row {}: credit note before any valid invoice, dropped", i);
                    continue;
                }
                trace!("Row {}: credit note {:?} against {:?}", i, cuin_text, state.last_valid_invoice);
                rows.push(CanonicalRow {
                    date,
                    invoice_number: state.last_valid_invoice.clone(),
                    cuin: state.last_valid_cuin.clone(),
                    amount: signed_amount(amount_cell, Sign::Negative)?,
                    remark: None,
                });
                continue;
            }

            trace!("Row {}: not a data line, dropped", i);
        }

        Ok(rows)
    }
}

impl Default for FixedPositionExtractor {
    fn default() -> Self {
        Self::from_config(&RemitConfig::default())
    }
}

impl RemittanceExtractor for FixedPositionExtractor {
    fn name(&self) -> &'static str {
        "fixed-position"
    }

    fn columns(&self) -> &'static [Field] {
        COLUMNS
    }

    fn extract(&self, document: &Document) -> Result<Vec<CanonicalRow>> {
        let table = expect_table(self.name(), document)?;
        let rows = self.walk(table)?;
        debug!("Fixed-position walk kept {} of {} rows", rows.len(), table.len());
        Ok(rows)
    }
}

fn signed_amount(cell: &Cell, sign: Sign) -> Result<Option<String>> {
    Ok(amount_from_cell(cell)?.map(|v| format_amount(apply_sign(v, Some(sign)))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build an eight-column row with values at the date, invoice, CUIN and
    /// amount positions (A, D, E, H).
    fn row(date: &str, invoice: &str, cuin: &str, amount: Cell) -> Vec<Cell> {
        vec![
            date.into(),
            Cell::Empty,
            Cell::Empty,
            invoice.into(),
            cuin.into(),
            Cell::Empty,
            Cell::Empty,
            amount,
        ]
    }

    fn extract(rows: Vec<Vec<Cell>>) -> Vec<CanonicalRow> {
        FixedPositionExtractor::default()
            .extract(&Document::Table(RawTable::new(rows)))
            .unwrap()
    }

    #[test]
    fn test_credit_note_reuses_last_invoice() {
        let rows = extract(vec![
            row("2024-08-01", "001-234", "5521", 100.0.into()),
            row("2024-08-02", "N/A", "CREDIT NOTE B", 50.0.into()),
        ]);

        assert_eq!(
            rows,
            vec![
                CanonicalRow {
                    date: Some("2024-08-01".to_string()),
                    invoice_number: Some("001234".to_string()),
                    cuin: Some("5521".to_string()),
                    amount: Some("100.00".to_string()),
                    remark: None,
                },
                CanonicalRow {
                    date: Some("2024-08-02".to_string()),
                    invoice_number: Some("001234".to_string()),
                    cuin: Some("5521".to_string()),
                    amount: Some("-50.00".to_string()),
                    remark: None,
                },
            ]
        );
    }

    #[test]
    fn test_valid_invoice_amount_is_forced_positive() {
        let rows = extract(vec![row("", "7788", "99", (-250.5).into())]);
        assert_eq!(rows[0].amount.as_deref(), Some("250.50"));
        assert_eq!(rows[0].date, None);
    }

    #[test]
    fn test_credit_marker_is_case_insensitive() {
        let rows = extract(vec![
            row("", "4410", "18", 900.0.into()),
            row("", "", "Impart to creditor", "-120".into()),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].invoice_number.as_deref(), Some("4410"));
        assert_eq!(rows[1].amount.as_deref(), Some("-120.00"));
    }

    #[test]
    fn test_non_data_rows_are_dropped() {
        let rows = extract(vec![
            row("QUICK MART LIMITED", "", "", Cell::Empty),
            row("Date", "Invoice No", "CUIN", "Amount".into()),
            row("", "Subtotal", "Total paid", 1000.0.into()),
            row("", "", "12345", 5.0.into()),
        ]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_credit_note_without_prior_invoice_is_dropped() {
        let rows = extract(vec![row("", "", "CREDIT NOTE B", 10.0.into())]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_bad_amount_is_format_error() {
        let table = RawTable::new(vec![row("", "1001", "1", "ten".into())]);
        let err = FixedPositionExtractor::default()
            .extract(&Document::Table(table))
            .unwrap_err();
        assert!(matches!(err, crate::error::ExtractionError::Format { .. }));
    }

    #[test]
    fn test_rejects_pdf_text() {
        let err = FixedPositionExtractor::default()
            .extract(&Document::Text(String::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::ExtractionError::UnsupportedInput { .. }
        ));
    }
}
