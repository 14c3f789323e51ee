//! Header synonym resolution.

use std::collections::HashMap;

use tracing::debug;

use crate::models::config::HeaderConfig;
use crate::models::row::Field;

/// Find the header matched by the highest-priority candidate.
///
/// Candidates are tried in order; for each one every header is compared
/// case-insensitively and exactly (no trimming). The first hit wins.
pub fn resolve_header<'a, S: AsRef<str>>(headers: &'a [String], candidates: &[S]) -> Option<&'a str> {
    resolve_index(headers, candidates).map(|i| headers[i].as_str())
}

/// Like [`resolve_header`] but returns the column index.
pub fn resolve_index<S: AsRef<str>>(headers: &[String], candidates: &[S]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        let candidate = candidate.as_ref().to_lowercase();
        headers.iter().position(|h| h.to_lowercase() == candidate)
    })
}

/// Canonical field to column index, built once per sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: HashMap<Field, usize>,
}

impl HeaderMap {
    /// Resolve each requested field against the header row.
    pub fn resolve(headers: &[String], config: &HeaderConfig, fields: &[Field]) -> Self {
        let columns: HashMap<Field, usize> = fields
            .iter()
            .filter_map(|&field| resolve_index(headers, config.synonyms(field)).map(|i| (field, i)))
            .collect();

        for &field in fields {
            match columns.get(&field) {
                Some(&i) => debug!("Resolved {} -> column {} ({:?})", field, i, headers[i]),
                None => debug!("No header found for {}", field),
            }
        }

        Self { columns }
    }

    /// Column index for a field, if resolved.
    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_exact_match() {
        let h = headers(&["date", "invoice", "Amount Paid (KSH)"]);
        assert_eq!(resolve_header(&h, &["Invoice"]), Some("invoice"));
        assert_eq!(resolve_header(&h, &["Amount Paid (Ksh)"]), Some("Amount Paid (KSH)"));
        // Substrings do not count
        assert_eq!(resolve_header(&h, &["Amount"]), None);
    }

    #[test]
    fn test_earliest_candidate_wins() {
        // "AMOUNT" appears first in the sheet but "Net Pay" has higher priority
        let h = headers(&["AMOUNT", "Net Pay"]);
        assert_eq!(resolve_header(&h, &["Net Pay", "AMOUNT"]), Some("Net Pay"));
        assert_eq!(resolve_header(&h, &["AMOUNT", "Net Pay"]), Some("AMOUNT"));
    }

    #[test]
    fn test_trailing_space_is_significant() {
        let h = headers(&["Doc/Inv #", "Suplr Inv # "]);
        assert_eq!(resolve_header(&h, &["Doc/Inv # "]), None);
        assert_eq!(resolve_header(&h, &["Suplr Inv # "]), Some("Suplr Inv # "));
    }

    #[test]
    fn test_header_map_partial_resolution() {
        let h = headers(&["Date", "CUIN Number", "Net Pay"]);
        let map = HeaderMap::resolve(
            &h,
            &HeaderConfig::default(),
            &[Field::Date, Field::InvoiceNumber, Field::Cuin, Field::Amount],
        );

        assert_eq!(map.column(Field::Date), Some(0));
        assert_eq!(map.column(Field::Cuin), Some(1));
        assert_eq!(map.column(Field::Amount), Some(2));
        assert_eq!(map.column(Field::InvoiceNumber), None);
        assert_eq!(map.column(Field::Remark), None);
    }
}
