//! Raw and canonical contract records.
//!
//! A [`RawRecord`] is what the field-extraction step hands us: loosely typed
//! values keyed by field name. A [`CanonicalRecord`] is the standardized form
//! produced by [`crate::standardize::Standardizer`]. Both keep their fields in
//! insertion order, which drives the flat key/value view and table layout.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::standardize::rules::patterns::ISO_DATE;

/// Marker rendered for absent values in displays and exports.
pub const ABSENT_MARKER: &str = "N/A";

/// Literal used by source documents for "specified as not applicable".
pub const NOT_APPLICABLE: &str = "-";

/// A field value as supplied by the extraction step.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Null, blank, or the literal `null` (any case).
    pub fn is_absent(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => {
                let s = s.trim();
                s.is_empty() || s.eq_ignore_ascii_case("null")
            }
            RawValue::Bool(_) | RawValue::Number(_) => false,
        }
    }

    /// Text form of the value, or `None` for null.
    ///
    /// Whole numbers render without a fractional part so that `2018` reads as
    /// `"2018"` rather than `"2018.0"`.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(Cow::Owned(format!("{}", *n as i64)))
            }
            RawValue::Number(n) => Some(Cow::Owned(n.to_string())),
            RawValue::Text(s) => Some(Cow::Borrowed(s)),
        }
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => n.as_f64().map(RawValue::Number).unwrap_or(RawValue::Null),
            Value::String(s) => RawValue::Text(s),
            // Nested structures are kept as their JSON text.
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Null => serializer.serialize_none(),
            RawValue::Bool(b) => serializer.serialize_bool(*b),
            RawValue::Number(n) => serializer.serialize_f64(*n),
            RawValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(RawValue::from)
    }
}

/// A standardized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Not found, not parseable, or null in the source.
    Absent,
    /// The source explicitly marked the field as not applicable (`-`).
    NotApplicable,
    /// Cleaned text, uppercase identifier, or validated email.
    Text(String),
    /// ISO `YYYY-MM-DD` date.
    Date(String),
    Integer(i64),
    Decimal(f64),
    /// Rendered as `Yes` / `No`.
    Flag(bool),
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Borrow the value as a string when it is textual (text or date).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Date(s) => Some(s),
            _ => None,
        }
    }

    /// Render for display, using `absent_marker` for absent values.
    pub fn render(&self, absent_marker: &str) -> String {
        match self {
            FieldValue::Absent => absent_marker.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str(ABSENT_MARKER),
            FieldValue::NotApplicable => f.write_str(NOT_APPLICABLE),
            FieldValue::Text(s) | FieldValue::Date(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Decimal(n) => write!(f, "{}", n),
            FieldValue::Flag(true) => f.write_str("Yes"),
            FieldValue::Flag(false) => f.write_str("No"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Absent => serializer.serialize_none(),
            FieldValue::NotApplicable => serializer.serialize_str(NOT_APPLICABLE),
            FieldValue::Text(s) | FieldValue::Date(s) => serializer.serialize_str(s),
            FieldValue::Integer(n) => serializer.serialize_i64(*n),
            FieldValue::Decimal(n) => serializer.serialize_f64(*n),
            FieldValue::Flag(b) => serializer.serialize_str(if *b { "Yes" } else { "No" }),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde_json::Value;

        Ok(match Value::deserialize(deserializer)? {
            Value::Null => FieldValue::Absent,
            Value::Bool(b) => FieldValue::Flag(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Decimal).unwrap_or(FieldValue::Absent),
            },
            Value::String(s) => match s.as_str() {
                NOT_APPLICABLE => FieldValue::NotApplicable,
                "Yes" => FieldValue::Flag(true),
                "No" => FieldValue::Flag(false),
                _ if ISO_DATE.is_match(&s) => FieldValue::Date(s),
                _ => FieldValue::Text(s),
            },
            other => FieldValue::Text(other.to_string()),
        })
    }
}

/// An ordered mapping from field name to value.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<V> {
    fields: Vec<(String, V)>,
}

/// Record as produced by the extraction step.
pub type RawRecord = Record<RawValue>;

/// Record after standardization.
pub type CanonicalRecord = Record<FieldValue>;

impl<V> Record<V> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert a field, replacing the value in place if the name already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<V> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<V> Default for Record<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Record<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

impl<V> IntoIterator for Record<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl CanonicalRecord {
    /// Number of fields holding a value (anything but absent).
    pub fn populated_count(&self) -> usize {
        self.fields.iter().filter(|(_, v)| !v.is_absent()).count()
    }

    /// One `(label, value)` row per field, in record order.
    ///
    /// Labels replace underscores with spaces and capitalize each word, so
    /// `daily_hire_rate_usd` becomes `Daily Hire Rate Usd`.
    pub fn to_flat_view(&self) -> Vec<(String, &FieldValue)> {
        self.fields
            .iter()
            .map(|(name, value)| (display_label(name), value))
            .collect()
    }
}

/// Human-readable label for a field name.
///
/// The first letter of every alphabetic run is uppercased and the rest
/// lowercased.
pub fn display_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut prev_alpha = false;

    for c in name.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            label.push(c);
            prev_alpha = false;
        }
    }

    label
}

impl<V: Serialize> Serialize for Record<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RecordVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for RecordVisitor<V> {
    type Value = Record<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut record = Record::new();
        while let Some((name, value)) = access.next_entry::<String, V>()? {
            record.insert(name, value);
        }
        Ok(record)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Record<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_raw_value_absence() {
        assert!(RawValue::Null.is_absent());
        assert!(RawValue::from("   ").is_absent());
        assert!(RawValue::from("NULL").is_absent());
        assert!(RawValue::from(" null ").is_absent());
        assert!(!RawValue::from("-").is_absent());
        assert!(!RawValue::Number(0.0).is_absent());
    }

    #[test]
    fn test_raw_value_text_form() {
        assert_eq!(RawValue::Number(2018.0).as_text().as_deref(), Some("2018"));
        assert_eq!(RawValue::Number(1.5).as_text().as_deref(), Some("1.5"));
        assert_eq!(RawValue::Null.as_text(), None);
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let json = r#"{"zeta": "1", "alpha": null, "mid": 3}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(record.get("alpha"), Some(&RawValue::Null));
        assert_eq!(record.get("mid"), Some(&RawValue::Number(3.0)));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = CanonicalRecord::new();
        record.insert("a", FieldValue::Integer(1));
        record.insert("b", FieldValue::Integer(2));
        record.insert("a", FieldValue::Integer(3));

        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&FieldValue::Integer(3)));
    }

    #[test]
    fn test_field_value_serialization() {
        let record: CanonicalRecord = vec![
            ("vessel_name", FieldValue::Text("M/V NORTHERN STAR".into())),
            ("contract_date", FieldValue::Date("2024-01-15".into())),
            ("year_built", FieldValue::Integer(2018)),
            ("daily_hire_rate_usd", FieldValue::Decimal(18500.5)),
            ("ICE CLASS", FieldValue::NotApplicable),
            ("CAN OFFHIRE BE ADDED?(CL 4(B))", FieldValue::Flag(true)),
            ("last_special_survey", FieldValue::Absent),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"vessel_name":"M/V NORTHERN STAR","contract_date":"2024-01-15","year_built":2018,"daily_hire_rate_usd":18500.5,"ICE CLASS":"-","CAN OFFHIRE BE ADDED?(CL 4(B))":"Yes","last_special_survey":null}"#
        );

        let back: CanonicalRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("daily_hire_rate_usd"), "Daily Hire Rate Usd");
        assert_eq!(display_label("imo_number"), "Imo Number");
        assert_eq!(display_label("VESSEL NAME"), "Vessel Name");
        assert_eq!(display_label("_source_file"), " Source File");
    }

    #[test]
    fn test_flat_view_keeps_record_order() {
        let record: CanonicalRecord = vec![
            ("vessel_name", FieldValue::Text("M/V AEGEAN EXPRESS".into())),
            ("charter_period_months", FieldValue::Integer(24)),
        ]
        .into_iter()
        .collect();

        let view = record.to_flat_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].0, "Vessel Name");
        assert_eq!(view[1].0, "Charter Period Months");
        assert_eq!(view[1].1, &FieldValue::Integer(24));
    }

    #[test]
    fn test_render_absent_marker() {
        assert_eq!(FieldValue::Absent.render("N/A"), "N/A");
        assert_eq!(FieldValue::Absent.render(""), "");
        assert_eq!(FieldValue::NotApplicable.render("N/A"), "-");
        assert_eq!(FieldValue::Flag(false).render("N/A"), "No");
    }
}
