//! Yes/No flags.

use super::present_text;
use crate::models::record::{FieldValue, RawValue};

/// Map yes/no style answers to [`FieldValue::Flag`].
pub fn normalize_boolean(raw: &RawValue) -> FieldValue {
    match raw {
        RawValue::Bool(b) => return FieldValue::Flag(*b),
        RawValue::Number(n) if *n == 1.0 => return FieldValue::Flag(true),
        RawValue::Number(n) if *n == 0.0 => return FieldValue::Flag(false),
        _ => {}
    }

    let Some(s) = present_text(raw) else {
        return FieldValue::Absent;
    };

    match s.to_uppercase().as_str() {
        "YES" | "Y" | "TRUE" | "1" => FieldValue::Flag(true),
        "NO" | "N" | "FALSE" | "0" | "N/A" | "N/A." => FieldValue::Flag(false),
        _ => FieldValue::Absent,
    }
}
