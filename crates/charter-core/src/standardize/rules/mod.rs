//! Per-kind normalizers for contract fields.
//!
//! Every normalizer takes one [`RawValue`] and returns one [`FieldValue`].
//! None of them fail: input that matches no recognized shape becomes
//! [`FieldValue::Absent`].

pub mod boolean;
pub mod dates;
pub mod email;
pub mod names;
pub mod numbers;
pub mod patterns;
pub mod text;

pub use boolean::normalize_boolean;
pub use dates::{normalize_date, parse_date};
pub use email::normalize_email;
pub use names::{normalize_digits, normalize_plain_name, normalize_vessel_name};
pub use numbers::{extract_numeric, normalize_currency, normalize_integer};
pub use text::normalize_text;

use crate::models::record::RawValue;

/// Trimmed text of a raw value, or `None` when the value counts as absent.
pub(crate) fn present_text(raw: &RawValue) -> Option<String> {
    if raw.is_absent() {
        return None;
    }
    raw.as_text().map(|s| s.trim().to_string())
}

/// Collapse every whitespace run to a single space and trim.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    patterns::WHITESPACE.replace_all(s.trim(), " ").into_owned()
}
