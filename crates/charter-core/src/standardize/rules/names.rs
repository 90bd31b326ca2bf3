//! Vessel names and other identifiers.

use super::numbers::extract_numeric;
use super::patterns::{
    COMPANY_KEYWORDS, PREFIX_MT, PREFIX_MT_DOTTED, PREFIX_MV, PREFIX_MV_DOTTED, VESSEL_PREFIX,
};
use super::{collapse_whitespace, present_text};
use crate::models::record::{FieldValue, RawValue};

/// Normalize a vessel name to `M/V NAME` / `MT NAME` form.
///
/// Names without a recognized prefix get `M/V ` unless they look like a
/// company. Company keywords such as `LTD` or `AS` match anywhere in the
/// name, so `ATLAS GLORY` is left unprefixed.
pub fn normalize_vessel_name(raw: &RawValue) -> FieldValue {
    match present_text(raw) {
        Some(s) => FieldValue::Text(vessel_name(&s)),
        None => FieldValue::Absent,
    }
}

/// Uppercase and collapse whitespace, without any prefix handling.
pub fn normalize_plain_name(raw: &RawValue) -> FieldValue {
    match present_text(raw) {
        Some(s) => FieldValue::Text(collapse_whitespace(&s.to_uppercase())),
        None => FieldValue::Absent,
    }
}

/// Numeric identifier rendered as a digit string (`IMO 9876543` -> `9876543`).
pub fn normalize_digits(raw: &RawValue) -> FieldValue {
    extract_numeric(raw)
        .map(|n| FieldValue::Text((n.trunc() as i64).to_string()))
        .unwrap_or(FieldValue::Absent)
}

fn vessel_name(input: &str) -> String {
    let mut name = collapse_whitespace(&input.to_uppercase());

    if !VESSEL_PREFIX.is_match(&name) && !is_company_name(&name) {
        name = format!("M/V {}", name);
    }

    let name = PREFIX_MV_DOTTED.replace(&name, "M/V ");
    let name = PREFIX_MV.replace(&name, "M/V ");
    let name = PREFIX_MT_DOTTED.replace(&name, "MT ");
    let name = PREFIX_MT.replace(&name, "MT ");

    collapse_whitespace(&name)
}

fn is_company_name(name: &str) -> bool {
    COMPANY_KEYWORDS.iter().any(|keyword| name.contains(keyword))
}
