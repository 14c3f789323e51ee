//! Canonical remittance row shared by every partner layout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical output fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    InvoiceNumber,
    Cuin,
    Amount,
    Remark,
}

impl Field {
    /// Column label used in written output.
    pub fn label(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::InvoiceNumber => "Invoice Number",
            Field::Cuin => "CUIN",
            Field::Amount => "Amount",
            Field::Remark => "Remark",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One normalized remittance line.
///
/// `amount`, when present, always has exactly two fraction digits and a
/// leading minus for credits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(rename = "Invoice Number")]
    pub invoice_number: Option<String>,

    #[serde(rename = "CUIN")]
    pub cuin: Option<String>,

    #[serde(rename = "Amount")]
    pub amount: Option<String>,

    #[serde(rename = "Remark")]
    pub remark: Option<String>,
}

impl CanonicalRow {
    /// Value of a field, `None` when absent.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Date => self.date.as_deref(),
            Field::InvoiceNumber => self.invoice_number.as_deref(),
            Field::Cuin => self.cuin.as_deref(),
            Field::Amount => self.amount.as_deref(),
            Field::Remark => self.remark.as_deref(),
        }
    }

    /// Whether the row can be traced back to an invoice, i.e. it has a
    /// non-empty invoice number or CUIN.
    pub fn has_reference(&self) -> bool {
        let non_empty = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        non_empty(&self.invoice_number) || non_empty(&self.cuin)
    }

    /// Project the row onto an ordered column set.
    pub fn project(&self, columns: &[Field]) -> Vec<String> {
        columns
            .iter()
            .map(|f| self.get(*f).unwrap_or_default().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_has_reference() {
        let mut row = CanonicalRow::default();
        assert!(!row.has_reference());

        row.cuin = Some("  ".to_string());
        assert!(!row.has_reference());

        row.invoice_number = Some("1001".to_string());
        assert!(row.has_reference());
    }

    #[test]
    fn test_project() {
        let row = CanonicalRow {
            invoice_number: Some("1001".to_string()),
            amount: Some("12.50".to_string()),
            ..Default::default()
        };

        assert_eq!(
            row.project(&[Field::InvoiceNumber, Field::Cuin, Field::Amount]),
            vec!["1001", "", "12.50"]
        );
    }
}
