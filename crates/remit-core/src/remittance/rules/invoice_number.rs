//! Invoice number cleaning.

use super::patterns::{ASCII_LETTER, NON_ALPHANUMERIC};

/// Strip everything but ASCII letters and digits from an invoice token.
///
/// Returns `None` when the residue contains a letter (notes, header
/// fragments, labels) or is empty: invoice numbers are numeric-only.
pub fn clean_invoice_number(raw: &str) -> Option<String> {
    let cleaned = NON_ALPHANUMERIC.replace_all(raw, "");
    if cleaned.is_empty() || ASCII_LETTER.is_match(&cleaned) {
        return None;
    }
    Some(cleaned.into_owned())
}
