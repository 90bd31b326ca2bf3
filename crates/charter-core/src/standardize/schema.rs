//! Field schemas: which normalizer applies to which field.
//!
//! A schema is plain data. The two built-in variants cover the snake_case
//! extraction format ([`SchemaVariant::Compact`], 33 fields) and the
//! spreadsheet-caption format ([`SchemaVariant::Extended`], 53 fields);
//! custom schemas load from JSON with [`FieldSchema::from_file`].

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CharterError, Result, SchemaError};

/// How an identifier-like field is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStyle {
    /// Uppercase with the `M/V ` / `MT ` prefix convention.
    Vessel,
    /// Uppercase and whitespace cleanup only.
    Plain,
    /// Numeric identifier kept as a digit string (IMO numbers).
    Digits,
}

/// Declared semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Date,
    Identifier { style: IdentifierStyle },
    Integer,
    /// Decimal rounded to the standardizer's precision.
    Currency,
    Text {
        /// Keep a bare `-` as "not applicable".
        #[serde(default)]
        sentinel: bool,
    },
    Email,
    Boolean,
}

impl FieldKind {
    pub const VESSEL: FieldKind = FieldKind::Identifier { style: IdentifierStyle::Vessel };
    pub const PLAIN_ID: FieldKind = FieldKind::Identifier { style: IdentifierStyle::Plain };
    pub const DIGITS: FieldKind = FieldKind::Identifier { style: IdentifierStyle::Digits };
    pub const TEXT: FieldKind = FieldKind::Text { sentinel: false };
    pub const TEXT_OR_DASH: FieldKind = FieldKind::Text { sentinel: true };
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Date => f.write_str("date"),
            FieldKind::Identifier { style: IdentifierStyle::Vessel } => f.write_str("vessel name"),
            FieldKind::Identifier { style: IdentifierStyle::Plain } => f.write_str("identifier"),
            FieldKind::Identifier { style: IdentifierStyle::Digits } => f.write_str("digits"),
            FieldKind::Integer => f.write_str("integer"),
            FieldKind::Currency => f.write_str("currency"),
            FieldKind::Text { sentinel: false } => f.write_str("text"),
            FieldKind::Text { sentinel: true } => f.write_str("text or -"),
            FieldKind::Email => f.write_str("email"),
            FieldKind::Boolean => f.write_str("yes/no"),
        }
    }
}

/// One schema entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    #[serde(flatten)]
    pub kind: FieldKind,

    /// What the extraction step should look for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Ordered table of field name to [`FieldKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaDefinition")]
pub struct FieldSchema {
    name: String,
    fields: Vec<FieldSpec>,
    search_field: String,
    sort_field: String,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct SchemaDefinition {
    name: String,
    fields: Vec<FieldSpec>,
    search_field: String,
    sort_field: String,
}

impl TryFrom<SchemaDefinition> for FieldSchema {
    type Error = SchemaError;

    fn try_from(def: SchemaDefinition) -> std::result::Result<Self, Self::Error> {
        FieldSchema::new(def.name, def.fields, def.search_field, def.sort_field)
    }
}

impl FieldSchema {
    /// Build a schema, rejecting duplicate fields and undeclared search/sort
    /// fields.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldSpec>,
        search_field: impl Into<String>,
        sort_field: impl Into<String>,
    ) -> std::result::Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut index = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        let search_field = search_field.into();
        if !index.contains_key(&search_field) {
            return Err(SchemaError::UndeclaredField {
                role: "search",
                field: search_field,
            });
        }

        let sort_field = sort_field.into();
        if !index.contains_key(&sort_field) {
            return Err(SchemaError::UndeclaredField {
                role: "sort",
                field: sort_field,
            });
        }

        Ok(Self {
            name: name.into(),
            fields,
            search_field,
            sort_field,
            index,
        })
    }

    /// Load a schema from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a schema from JSON. Unknown field kinds are rejected here.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CharterError::Schema(SchemaError::Invalid(e.to_string())))
    }

    /// The 33-field snake_case schema.
    pub fn compact() -> Self {
        Self::from_table("compact", COMPACT_FIELDS, "vessel_name", "contract_date")
    }

    /// The 53-field caption schema.
    pub fn extended() -> Self {
        Self::from_table("extended", EXTENDED_FIELDS, "VESSEL NAME", "TCP DATE")
    }

    fn from_table(
        name: &str,
        table: &[(&str, FieldKind, &str)],
        search_field: &str,
        sort_field: &str,
    ) -> Self {
        let fields = table
            .iter()
            .map(|(field, kind, description)| {
                FieldSpec::new(*field, *kind).with_description(*description)
            })
            .collect();

        Self::new(name, fields, search_field, sort_field)
            .unwrap_or_else(|e| panic!("built-in {} schema is invalid: {}", name, e))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declared kind of a field.
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.index.get(name).map(|&i| self.fields[i].kind)
    }

    /// Declaration position of a field.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name-like field used for vessel searches.
    pub fn search_field(&self) -> &str {
        &self.search_field
    }

    /// Date-like field used to order search results.
    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }
}

impl PartialEq for FieldSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.fields == other.fields
            && self.search_field == other.search_field
            && self.sort_field == other.sort_field
    }
}

/// Built-in schema selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    #[default]
    Compact,
    Extended,
}

impl SchemaVariant {
    pub fn schema(&self) -> FieldSchema {
        match self {
            SchemaVariant::Compact => FieldSchema::compact(),
            SchemaVariant::Extended => FieldSchema::extended(),
        }
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVariant::Compact => write!(f, "compact"),
            SchemaVariant::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = SchemaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(SchemaVariant::Compact),
            "extended" => Ok(SchemaVariant::Extended),
            other => Err(SchemaError::Invalid(format!("unknown schema variant: {}", other))),
        }
    }
}

const COMPACT_FIELDS: &[(&str, FieldKind, &str)] = &[
    ("contract_number", FieldKind::TEXT, "Contract reference number"),
    ("contract_date", FieldKind::Date, "Date of contract"),
    ("vessel_name", FieldKind::VESSEL, "Name of the vessel"),
    ("imo_number", FieldKind::DIGITS, "IMO number"),
    ("vessel_flag", FieldKind::TEXT, "Flag/nationality"),
    ("year_built", FieldKind::Integer, "Year vessel was built"),
    ("vessel_type", FieldKind::TEXT, "Type of vessel (bulk carrier, tanker, container, etc.)"),
    ("deadweight", FieldKind::TEXT, "Deadweight tonnage"),
    ("gross_tonnage", FieldKind::TEXT, "Gross tonnage"),
    ("owner_name", FieldKind::TEXT, "Owner's company name"),
    ("owner_location", FieldKind::TEXT, "Owner's location/country"),
    ("charterer_name", FieldKind::TEXT, "Charterer's company name"),
    ("charterer_location", FieldKind::TEXT, "Charterer's location/country"),
    ("charter_period_months", FieldKind::Integer, "Charter period in months (numeric)"),
    ("daily_hire_rate_usd", FieldKind::Currency, "Daily hire rate in USD (numeric only)"),
    ("delivery_date", FieldKind::Date, "Delivery date or period"),
    ("delivery_port", FieldKind::TEXT, "Delivery port/place"),
    ("redelivery_port", FieldKind::TEXT, "Redelivery port/place or range"),
    ("speed_about", FieldKind::TEXT, "Speed in knots"),
    ("consumption_per_day", FieldKind::TEXT, "Fuel consumption per day"),
    ("bunkers_delivery_ifo", FieldKind::TEXT, "IFO/VLSFO quantity on delivery (metric tons)"),
    ("bunkers_delivery_mgo", FieldKind::TEXT, "MGO/MDO quantity on delivery (metric tons)"),
    ("bunkers_redelivery_ifo", FieldKind::TEXT, "IFO/VLSFO quantity on redelivery (metric tons)"),
    ("bunkers_redelivery_mgo", FieldKind::TEXT, "MGO/MDO quantity on redelivery (metric tons)"),
    ("last_special_survey", FieldKind::Date, "Date of last special survey"),
    ("next_special_survey", FieldKind::Date, "Date when next special survey is due"),
    ("drydocking_policy", FieldKind::TEXT, "Summary of drydocking provisions"),
    ("off_hire_threshold_hours", FieldKind::Integer, "Minimum hours before off-hire applies (numeric)"),
    ("trading_limits", FieldKind::TEXT, "Geographic trading limits"),
    ("law_and_arbitration", FieldKind::TEXT, "Governing law and arbitration location"),
    ("commission_rate", FieldKind::TEXT, "Commission rate percentage"),
    ("charter_period_description", FieldKind::TEXT, "Full charter period description"),
    ("additional_notes", FieldKind::TEXT, "Any other significant terms or special conditions"),
];

const EXTENDED_FIELDS: &[(&str, FieldKind, &str)] = &[
    ("TCP DATE", FieldKind::Date, "Date of the charter party"),
    ("CONTRACT TYPE", FieldKind::TEXT_OR_DASH, "Charter party form or contract type"),
    ("STTC/ LTTC", FieldKind::TEXT_OR_DASH, "Short-term or long-term time charter"),
    ("VESSEL NAME", FieldKind::PLAIN_ID, "Name of the vessel"),
    ("IMO NUMBER", FieldKind::DIGITS, "IMO number"),
    ("TYPE AUTO.", FieldKind::TEXT_OR_DASH, "Vessel type"),
    ("TRADE", FieldKind::TEXT_OR_DASH, "Trade the vessel is employed in"),
    ("BUILT", FieldKind::Integer, "Year built"),
    ("FLAG", FieldKind::TEXT_OR_DASH, "Flag state"),
    ("DWT", FieldKind::Integer, "Deadweight tonnage"),
    ("OWNERS.", FieldKind::TEXT_OR_DASH, "Registered owners"),
    ("BENEFICIAL OWNER (FROM BANK DETAILS)", FieldKind::TEXT_OR_DASH, "Beneficial owner named in the bank details"),
    ("OWNER EMAIL ADDRESS", FieldKind::Email, "Owners' email address"),
    ("TECHNICAL MANAGER", FieldKind::TEXT_OR_DASH, "Technical manager"),
    ("TECHNICAL MANAGER EMAIL ADDRESS", FieldKind::Email, "Technical manager's email address"),
    ("CHARTERERS", FieldKind::TEXT_OR_DASH, "Charterers"),
    ("BROKER", FieldKind::TEXT_OR_DASH, "Broker"),
    ("BROKERS EMAIL", FieldKind::Email, "Broker's email address"),
    ("VESSEL EMAIL", FieldKind::Email, "Vessel's email address"),
    ("CHARTER LENGTH", FieldKind::TEXT_OR_DASH, "Charter period"),
    ("CURRENT TC RATE(CL 8)", FieldKind::Currency, "Current daily hire rate in USD (clause 8)"),
    ("FIXED/ MARKET RELATED", FieldKind::TEXT_OR_DASH, "Whether hire is fixed or market related"),
    ("OPTION PERIODS", FieldKind::TEXT_OR_DASH, "Charterers' option periods"),
    ("LENGTH OF NEXT OPTION", FieldKind::TEXT_OR_DASH, "Length of the next option period"),
    ("OPTION DECLARATION DATE.", FieldKind::Date, "Latest date to declare the next option"),
    ("DELIVERY DATE", FieldKind::Date, "Delivery date"),
    ("DELIVERY LOCATION", FieldKind::TEXT_OR_DASH, "Delivery port or place"),
    ("REDELIVERY DATE", FieldKind::Date, "Redelivery date"),
    ("REDELIVERY LOCATION", FieldKind::TEXT_OR_DASH, "Redelivery port, place or range"),
    ("EARLIEST REDELIVERY DATE.", FieldKind::Date, "Earliest redelivery date"),
    ("LATEST REDELIVERY DATE.", FieldKind::Date, "Latest redelivery date"),
    ("ALL REDEL NOTICES", FieldKind::TEXT_OR_DASH, "Full redelivery notice schedule"),
    ("FIRST REDEL NOTICE", FieldKind::Integer, "Days of the first redelivery notice"),
    ("REDEL CHOP minus DAYS", FieldKind::Integer, "Days charterers may redeliver early"),
    ("REDEL CHOP plus DAYS", FieldKind::Integer, "Days charterers may redeliver late"),
    ("LAST CARGOES ON REDELIVERY", FieldKind::TEXT_OR_DASH, "Restrictions on last cargoes before redelivery"),
    ("BUNKERS ON REDELIVERY(CL 15)", FieldKind::TEXT_OR_DASH, "Bunker quantities on redelivery (clause 15)"),
    ("CAN OFFHIRE BE ADDED?(CL 4(B))", FieldKind::Boolean, "Whether off-hire periods may be added to the charter period (clause 4(b))"),
    ("OTHER REDELIVERY TERMS (E#G BALLAST BONUS)", FieldKind::TEXT_OR_DASH, "Other redelivery terms such as ballast bonus"),
    ("CLASSIFICATION SOCIETY", FieldKind::TEXT_OR_DASH, "Classification society"),
    ("P&I CLUB", FieldKind::TEXT_OR_DASH, "P&I club"),
    ("H&M VALUE USDM", FieldKind::Currency, "Hull and machinery insured value in USD millions"),
    ("IMO TYPE", FieldKind::TEXT_OR_DASH, "IMO ship type"),
    ("ICE CLASS", FieldKind::TEXT_OR_DASH, "Ice class notation"),
    ("DRY-DOCK LOCATION", FieldKind::TEXT_OR_DASH, "Agreed dry-dock location"),
    ("LAST DRY-DOCK DATE.", FieldKind::Date, "Date of last dry-docking"),
    ("NEXT DRY-DOCK DUE.", FieldKind::Date, "Date next dry-docking is due"),
    ("SPEED & CONSUMPTION", FieldKind::TEXT_OR_DASH, "Warranted speed and consumption"),
    ("ADDRESS COMMISSION %", FieldKind::Currency, "Address commission percentage"),
    ("BROKERAGE COMMISSION %", FieldKind::Currency, "Brokerage commission percentage"),
    ("LAW & ARBITRATION", FieldKind::TEXT_OR_DASH, "Governing law and place of arbitration"),
    ("TRADING LIMITS", FieldKind::TEXT_OR_DASH, "Geographic trading limits"),
    ("REMARKS", FieldKind::TEXT_OR_DASH, "Any other significant terms"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_sizes() {
        assert_eq!(FieldSchema::compact().len(), 33);
        assert_eq!(FieldSchema::extended().len(), 53);
    }

    #[test]
    fn test_builtin_kinds() {
        let compact = FieldSchema::compact();
        assert_eq!(compact.kind_of("vessel_name"), Some(FieldKind::VESSEL));
        assert_eq!(compact.kind_of("contract_date"), Some(FieldKind::Date));
        assert_eq!(compact.kind_of("daily_hire_rate_usd"), Some(FieldKind::Currency));
        assert_eq!(compact.kind_of("VESSEL NAME"), None);

        let extended = FieldSchema::extended();
        assert_eq!(extended.kind_of("VESSEL NAME"), Some(FieldKind::PLAIN_ID));
        assert_eq!(extended.kind_of("ICE CLASS"), Some(FieldKind::TEXT_OR_DASH));
        assert_eq!(extended.kind_of("CAN OFFHIRE BE ADDED?(CL 4(B))"), Some(FieldKind::Boolean));
        assert_eq!(extended.search_field(), "VESSEL NAME");
        assert_eq!(extended.sort_field(), "TCP DATE");
    }

    #[test]
    fn test_positions_follow_declaration() {
        let compact = FieldSchema::compact();
        assert_eq!(compact.position("contract_number"), Some(0));
        assert_eq!(compact.position("additional_notes"), Some(32));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = FieldSchema::new(
            "dup",
            vec![
                FieldSpec::new("a", FieldKind::Date),
                FieldSpec::new("a", FieldKind::TEXT),
            ],
            "a",
            "a",
        );
        assert!(matches!(result, Err(SchemaError::DuplicateField(f)) if f == "a"));
    }

    #[test]
    fn test_undeclared_search_field_rejected() {
        let result = FieldSchema::new("s", vec![FieldSpec::new("a", FieldKind::Date)], "name", "a");
        assert!(matches!(
            result,
            Err(SchemaError::UndeclaredField { role: "search", .. })
        ));
    }

    #[test]
    fn test_empty_schema_rejected() {
        assert!(matches!(
            FieldSchema::new("e", vec![], "a", "a"),
            Err(SchemaError::Empty)
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let schema = FieldSchema::extended();
        let json = serde_json::to_string(&schema).unwrap();
        let back = FieldSchema::from_json(&json).unwrap();
        assert_eq!(back, schema);
        assert_eq!(back.kind_of("DWT"), Some(FieldKind::Integer));
    }

    #[test]
    fn test_json_field_shape() {
        let json = r#"{
            "name": "custom",
            "search_field": "ship",
            "sort_field": "signed",
            "fields": [
                {"name": "ship", "kind": "identifier", "style": "vessel"},
                {"name": "signed", "kind": "date"},
                {"name": "notes", "kind": "text", "sentinel": true},
                {"name": "remarks", "kind": "text"}
            ]
        }"#;

        let schema = FieldSchema::from_json(json).unwrap();
        assert_eq!(schema.kind_of("ship"), Some(FieldKind::VESSEL));
        assert_eq!(schema.kind_of("notes"), Some(FieldKind::TEXT_OR_DASH));
        assert_eq!(schema.kind_of("remarks"), Some(FieldKind::TEXT));
    }

    #[test]
    fn test_unknown_kind_fails_at_load() {
        let json = r#"{
            "name": "bad",
            "search_field": "a",
            "sort_field": "a",
            "fields": [{"name": "a", "kind": "timestamp"}]
        }"#;

        assert!(matches!(
            FieldSchema::from_json(json),
            Err(CharterError::Schema(SchemaError::Invalid(_)))
        ));
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Extended".parse::<SchemaVariant>().unwrap(), SchemaVariant::Extended);
        assert!("wide".parse::<SchemaVariant>().is_err());
    }
}
