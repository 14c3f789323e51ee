//! Common regex patterns for remittance extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One remittance line in extracted PDF text:
    // CUIN, dd-mm-yy date, free-text remark, amount with optional trailing minus.
    // Date and amount digits are ASCII only so every match parses as a decimal.
    pub static ref PDF_REMITTANCE_LINE: Regex = Regex::new(
        r"(?m)([\d\w/]+)\s*([0-9]{2}-[0-9]{2}-[0-9]{2})\s*(.*?)\s([0-9,]+\.[0-9]{2}-?)"
    ).unwrap();

    // Anything that is not an ASCII letter or digit
    pub static ref NON_ALPHANUMERIC: Regex = Regex::new(r"[^a-zA-Z0-9]").unwrap();

    // Any ASCII letter
    pub static ref ASCII_LETTER: Regex = Regex::new(r"[a-zA-Z]").unwrap();

    // Plain decimal after separators are removed: optional sign, digits, optional fraction
    pub static ref DECIMAL_AMOUNT: Regex = Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)$").unwrap();
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive test against any of several needles.
pub fn contains_any_ignore_case<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|n| haystack.contains(&n.as_ref().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("LESS CREDITS", "less credits"));
        assert!(!contains_ignore_case("Less Credit", "less credits"));
        assert!(contains_any_ignore_case("Total To Pay", &["to pay", "xyz"]));
        assert!(!contains_any_ignore_case("1001", &["to pay"]));
    }

    #[test]
    fn test_decimal_amount_shape() {
        assert!(DECIMAL_AMOUNT.is_match("1250.00"));
        assert!(DECIMAL_AMOUNT.is_match("-50"));
        assert!(DECIMAL_AMOUNT.is_match(".5"));
        assert!(!DECIMAL_AMOUNT.is_match("12a"));
        assert!(!DECIMAL_AMOUNT.is_match(""));
        assert!(!DECIMAL_AMOUNT.is_match("١٢٣.٠٠"));
        assert!(!DECIMAL_AMOUNT.is_match("１２"));
    }
}
