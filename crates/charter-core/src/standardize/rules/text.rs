//! Free-text cleanup.

use super::{collapse_whitespace, present_text};
use crate::models::record::{FieldValue, RawValue, NOT_APPLICABLE};

/// Trim and collapse whitespace.
///
/// With `sentinel` set, a bare `-` becomes [`FieldValue::NotApplicable`];
/// otherwise it is kept as ordinary text.
pub fn normalize_text(raw: &RawValue, sentinel: bool) -> FieldValue {
    let Some(s) = present_text(raw) else {
        return FieldValue::Absent;
    };

    let text = collapse_whitespace(&s);
    if sentinel && text == NOT_APPLICABLE {
        return FieldValue::NotApplicable;
    }

    FieldValue::Text(text)
}
