//! Numeric and currency extraction.

use rust_decimal::Decimal;

use super::patterns::{NUMBER, NUMERIC_NOISE};
use crate::models::record::{FieldValue, RawValue};

/// Extract the first number from a raw value.
///
/// Native numbers pass through. Text is stripped of thousands separators,
/// currency symbols and whitespace before the first `-?\d+\.?\d*` run is
/// parsed, so `"82,500 metric tons"` yields `82500.0`.
pub fn extract_numeric(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(n) if n.is_finite() => Some(*n),
        RawValue::Text(_) if !raw.is_absent() => {
            let s = raw.as_text()?;
            let cleaned = NUMERIC_NOISE.replace_all(&s, "");
            NUMBER
                .find(&cleaned)
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Whole-number field; fractional parts are truncated toward zero.
pub fn normalize_integer(raw: &RawValue) -> FieldValue {
    extract_numeric(raw)
        .filter(|n| n.abs() < i64::MAX as f64)
        .map(|n| FieldValue::Integer(n.trunc() as i64))
        .unwrap_or(FieldValue::Absent)
}

/// Currency field rounded to `places` decimal places.
pub fn normalize_currency(raw: &RawValue, places: u32) -> FieldValue {
    extract_numeric(raw)
        .map(|n| FieldValue::Decimal(round_to(n, places)))
        .unwrap_or(FieldValue::Absent)
}

fn round_to(n: f64, places: u32) -> f64 {
    // Rounds the exact binary value, so 2.675 (stored as 2.67499...) gives 2.67.
    // Going through the decimal string keeps the nearest f64 to the result.
    Decimal::from_f64_retain(n)
        .map(|d| d.round_dp(places))
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or_else(|| {
            let factor = 10f64.powi(places as i32);
            (n * factor).round() / factor
        })
}
