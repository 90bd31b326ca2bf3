//! Email address validation.

use super::patterns::EMAIL;
use super::present_text;
use crate::models::record::{FieldValue, RawValue};

/// Lowercase and validate an email address; anything malformed is absent.
pub fn normalize_email(raw: &RawValue) -> FieldValue {
    present_text(raw)
        .map(|s| s.to_lowercase())
        .filter(|s| EMAIL.is_match(s))
        .map(FieldValue::Text)
        .unwrap_or(FieldValue::Absent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> FieldValue {
        normalize_email(&RawValue::from(s))
    }

    #[test]
    fn test_valid_email() {
        assert_eq!(
            email("  Ops@Nordic-Maritime.NO "),
            FieldValue::Text("ops@nordic-maritime.no".to_string())
        );
        assert_eq!(
            email("chartering+tc@example.co.uk"),
            FieldValue::Text("chartering+tc@example.co.uk".to_string())
        );
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(email("ops at nordic.no"), FieldValue::Absent);
        assert_eq!(email("ops@nordic"), FieldValue::Absent);
        assert_eq!(email("ops@nordic.n"), FieldValue::Absent);
        assert_eq!(email("ops@nordic.no, chartering@nordic.no"), FieldValue::Absent);
        assert_eq!(email("-"), FieldValue::Absent);
        assert_eq!(normalize_email(&RawValue::Null), FieldValue::Absent);
    }
}
