//! PDF text layout: one canonical row per remittance line found in the text.

use tracing::debug;

use crate::error::ExtractionError;
use crate::models::row::{CanonicalRow, Field};
use crate::remittance::rules::{normalize_amount, parse_pdf_lines};
use crate::remittance::{Document, RemittanceExtractor, Result};

const COLUMNS: &[Field] = &[
    Field::InvoiceNumber,
    Field::Cuin,
    Field::Date,
    Field::Remark,
    Field::Amount,
];

/// Extractor for PDF remittances whose text carries
/// `<cuin> <dd-mm-yy> <remark> <amount>` lines.
#[derive(Debug, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl RemittanceExtractor for PdfTextExtractor {
    fn name(&self) -> &'static str {
        "pdf-text"
    }

    fn columns(&self) -> &'static [Field] {
        COLUMNS
    }

    fn extract(&self, document: &Document) -> Result<Vec<CanonicalRow>> {
        let text = match document {
            Document::Text(text) => text,
            other => {
                return Err(ExtractionError::UnsupportedInput {
                    extractor: self.name(),
                    found: other.kind(),
                });
            }
        };

        let rows = parse_pdf_lines(text)
            .into_iter()
            .map(|line| {
                Ok(CanonicalRow {
                    date: Some(line.date),
                    // PDF remittances carry no invoice number
                    invoice_number: Some(String::new()),
                    cuin: Some(line.cuin),
                    amount: Some(normalize_amount(&line.amount, None)?),
                    remark: Some(line.remark).filter(|r| !r.is_empty()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("PDF text produced {} rows", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::RawTable;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_payment_line() {
        let doc = Document::Text("AB123 01-08-24 Payment received 1,250.00-".to_string());
        let rows = PdfTextExtractor::new().extract(&doc).unwrap();

        assert_eq!(
            rows,
            vec![CanonicalRow {
                date: Some("01-08-24".to_string()),
                invoice_number: Some(String::new()),
                cuin: Some("AB123".to_string()),
                amount: Some("-1250.00".to_string()),
                remark: Some("Payment received".to_string()),
            }]
        );
    }

    #[test]
    fn test_projection_keeps_empty_invoice_column() {
        let doc = Document::Text("7781 12-08-24 900.00\n".to_string());
        let rows = PdfTextExtractor::new().extract(&doc).unwrap();
        assert_eq!(
            rows[0].project(PdfTextExtractor::new().columns()),
            vec!["", "7781", "12-08-24", "", "900.00"]
        );
    }

    #[test]
    fn test_text_without_lines_is_empty() {
        let doc = Document::Text("Remittance Advice\nNo payments this period".to_string());
        assert!(PdfTextExtractor::new().extract(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_spreadsheet() {
        let doc = Document::Table(RawTable::new(Vec::new()));
        let err = PdfTextExtractor::new().extract(&doc).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::UnsupportedInput {
                extractor: "pdf-text",
                found: "spreadsheet"
            }
        ));
    }
}
