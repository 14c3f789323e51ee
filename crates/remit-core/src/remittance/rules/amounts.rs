//! Amount parsing and canonical formatting.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::patterns::DECIMAL_AMOUNT;
use crate::error::ExtractionError;
use crate::models::table::Cell;

/// Sign to force onto an amount regardless of its source sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// Parse an amount token such as `"1,250.00"`, `"-50"` or `"1,250.00-"`.
///
/// Thousands separators and surrounding whitespace are removed; a trailing
/// minus is read as a negative sign.
pub fn parse_amount(raw: &str) -> Result<Decimal, ExtractionError> {
    let invalid = || ExtractionError::Format {
        value: raw.to_string(),
    };

    let mut cleaned: String = raw.trim().replace(',', "");
    if let Some(stripped) = cleaned.strip_suffix('-') {
        if !stripped.starts_with('-') {
            cleaned = format!("-{}", stripped.trim_end());
        }
    }

    if !DECIMAL_AMOUNT.is_match(&cleaned) {
        return Err(invalid());
    }

    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.trim_start_matches('+')),
    };

    // Decimal::from_str wants digits on both sides of the point
    let mut digits = digits.to_string();
    if digits.starts_with('.') {
        digits.insert(0, '0');
    }
    if digits.ends_with('.') {
        digits.push('0');
    }

    let value = Decimal::from_str(&digits).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

/// Read an amount from a sheet cell. Empty cells yield `None`.
pub fn amount_from_cell(cell: &Cell) -> Result<Option<Decimal>, ExtractionError> {
    match cell {
        c if c.is_empty() => Ok(None),
        Cell::Number(n) => Decimal::from_f64(*n)
            .map(Some)
            .ok_or_else(|| ExtractionError::Format {
                value: n.to_string(),
            }),
        Cell::Text(s) => parse_amount(s).map(Some),
        other => Err(ExtractionError::Format {
            value: other.to_string(),
        }),
    }
}

/// Apply a forced sign to the absolute value, or keep the value as is.
pub fn apply_sign(value: Decimal, sign: Option<Sign>) -> Decimal {
    match sign {
        Some(Sign::Positive) => value.abs(),
        Some(Sign::Negative) => -value.abs(),
        None => value,
    }
}

/// Format an amount with exactly two fraction digits.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Normalize an amount token to the canonical two-decimal form.
pub fn normalize_amount(raw: &str, sign: Option<Sign>) -> Result<String, ExtractionError> {
    parse_amount(raw).map(|v| format_amount(apply_sign(v, sign)))
}
