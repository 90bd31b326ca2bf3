//! Schema-driven record standardization.

use serde::Serialize;
use tracing::debug;

use crate::models::record::{CanonicalRecord, FieldValue, RawRecord, RawValue};

use super::rules::{
    normalize_boolean, normalize_currency, normalize_date, normalize_digits, normalize_email,
    normalize_integer, normalize_plain_name, normalize_text, normalize_vessel_name,
};
use super::schema::{FieldKind, FieldSchema, IdentifierStyle};

/// Default decimal places for currency fields.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Standardized record together with a per-field account of what happened.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StandardizeReport {
    /// The canonical record, identical to [`Standardizer::standardize`].
    pub record: CanonicalRecord,
    /// Schema fields the raw record never supplied.
    pub missing_fields: Vec<String>,
    /// Supplied fields that normalized to absence.
    pub unparsed_fields: Vec<String>,
    /// Supplied fields the schema does not declare; dropped from the record.
    pub unknown_fields: Vec<String>,
}

impl StandardizeReport {
    /// Number of fields carrying a value.
    pub fn populated(&self) -> usize {
        self.record.populated_count()
    }
}

/// Applies a [`FieldSchema`] to raw records.
#[derive(Debug, Clone)]
pub struct Standardizer {
    schema: FieldSchema,
    decimal_places: u32,
}

impl Standardizer {
    pub fn new(schema: FieldSchema) -> Self {
        Self {
            schema,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }

    /// Set currency rounding precision.
    pub fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Run the normalizer for `kind` on one value.
    pub fn normalize(&self, kind: FieldKind, raw: &RawValue) -> FieldValue {
        match kind {
            FieldKind::Date => normalize_date(raw),
            FieldKind::Identifier { style } => match style {
                IdentifierStyle::Vessel => normalize_vessel_name(raw),
                IdentifierStyle::Plain => normalize_plain_name(raw),
                IdentifierStyle::Digits => normalize_digits(raw),
            },
            FieldKind::Integer => normalize_integer(raw),
            FieldKind::Currency => normalize_currency(raw, self.decimal_places),
            FieldKind::Text { sentinel } => normalize_text(raw, sentinel),
            FieldKind::Email => normalize_email(raw),
            FieldKind::Boolean => normalize_boolean(raw),
        }
    }

    /// Standardize every schema field present in `raw`.
    ///
    /// Output follows schema declaration order. Fields the raw record does
    /// not supply are left out; fields it supplies but that fail to parse
    /// are kept as [`FieldValue::Absent`]. Undeclared raw fields are dropped.
    pub fn standardize(&self, raw: &RawRecord) -> CanonicalRecord {
        self.schema
            .fields()
            .iter()
            .filter_map(|spec| {
                raw.get(&spec.name)
                    .map(|value| (spec.name.clone(), self.normalize(spec.kind, value)))
            })
            .collect()
    }

    /// Like [`standardize`](Self::standardize), but also reports missing,
    /// unparsed and unknown fields.
    pub fn standardize_with_report(&self, raw: &RawRecord) -> StandardizeReport {
        let record = self.standardize(raw);

        let missing_fields: Vec<String> = self
            .schema
            .field_names()
            .filter(|name| !raw.contains(name))
            .map(String::from)
            .collect();

        let unparsed_fields: Vec<String> = record
            .iter()
            .filter(|(_, value)| value.is_absent())
            .map(|(name, _)| name.to_string())
            .collect();

        let unknown_fields: Vec<String> = raw
            .names()
            .filter(|name| !self.schema.contains(name))
            .map(String::from)
            .collect();

        debug!(
            "standardized {}/{} fields ({} missing, {} unparsed, {} unknown)",
            record.populated_count(),
            self.schema.len(),
            missing_fields.len(),
            unparsed_fields.len(),
            unknown_fields.len()
        );

        StandardizeReport {
            record,
            missing_fields,
            unparsed_fields,
            unknown_fields,
        }
    }
}

/// Standardize `raw` against `schema` with default precision.
pub fn standardize(raw: &RawRecord, schema: &FieldSchema) -> CanonicalRecord {
    Standardizer::new(schema.clone()).standardize(raw)
}
