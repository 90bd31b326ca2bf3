//! Bridge to the field-extraction step.
//!
//! Field extraction itself happens elsewhere (typically a language model).
//! This module builds the request text for a schema and turns the reply
//! back into a [`RawRecord`].

use serde_json::Value;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::record::RawRecord;
use crate::standardize::rules::patterns::{FENCE_CLOSE, FENCE_OPEN};
use crate::standardize::FieldSchema;

impl FieldSchema {
    /// Build an extraction prompt asking for every schema field as JSON.
    pub fn extraction_prompt(&self, contract_text: &str) -> String {
        let mut prompt = String::from(
            "Please analyze this Time Charter Party (TCP) contract and extract the \
             following information into a structured format.\n\nCONTRACT TEXT:\n",
        );
        prompt.push_str(contract_text);
        prompt.push_str(
            "\n\nPlease extract and return ONLY the following fields in valid JSON format. \
             If a field is not found, use null:\n\n{\n",
        );

        let lines: Vec<String> = self
            .fields()
            .iter()
            .map(|field| {
                let description = field.description.as_deref().unwrap_or(&field.name);
                format!(
                    "    {}: {}",
                    Value::String(field.name.clone()),
                    Value::String(format!("{} ({})", description, field.kind))
                )
            })
            .collect();
        prompt.push_str(&lines.join(",\n"));

        prompt.push_str("\n}\n\nReturn ONLY valid JSON, no other text or explanation.");
        prompt
    }
}

/// Rough token count of a text, for cost estimates.
pub fn estimate_tokens(text: &str) -> usize {
    (text.split_whitespace().count() as f64 * 1.3) as usize
}

/// Parse an extraction reply into a raw record.
///
/// Markdown code fences around the JSON are removed. The reply must be a
/// non-empty JSON object.
pub fn parse_raw_record(response: &str) -> Result<RawRecord, ExtractionError> {
    let mut body = response.trim();
    let unfenced;
    if body.starts_with("```") {
        let opened = FENCE_OPEN.replace(body, "");
        unfenced = FENCE_CLOSE.replace(&opened, "").trim().to_string();
        body = &unfenced;
    }

    let record: RawRecord = match serde_json::from_str(body) {
        Ok(record) => record,
        Err(e) if e.is_data() => return Err(ExtractionError::NotAnObject(json_kind(body))),
        Err(e) => return Err(ExtractionError::InvalidJson(e.to_string())),
    };

    if record.is_empty() {
        return Err(ExtractionError::NoData);
    }

    debug!("Parsed {} fields from extraction response", record.len());
    Ok(record)
}

fn json_kind(body: &str) -> &'static str {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(_)) => "array",
        Ok(Value::String(_)) => "string",
        Ok(Value::Number(_)) => "number",
        Ok(Value::Bool(_)) => "boolean",
        Ok(Value::Null) => "null",
        Ok(Value::Object(_)) | Err(_) => "value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::RawValue;

    #[test]
    fn test_parse_plain_object() {
        let record = parse_raw_record(r#"{"vessel_name": "Star", "year_built": 2018}"#).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("vessel_name"), Some(&RawValue::from("Star")));
        assert_eq!(record.get("year_built"), Some(&RawValue::Number(2018.0)));
    }

    #[test]
    fn test_parse_keeps_reply_order() {
        let record =
            parse_raw_record(r#"{"year_built": 2018, "cargo": "coal", "vessel_name": "Star"}"#)
                .unwrap();
        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["year_built", "cargo", "vessel_name"]);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "```json\n{\"vessel_name\": null, \"contract_date\": \"15 Jan 2024\"}\n```";
        let record = parse_raw_record(reply).unwrap();
        assert_eq!(record.get("vessel_name"), Some(&RawValue::Null));
        assert_eq!(record.get("contract_date"), Some(&RawValue::from("15 Jan 2024")));
    }

    #[test]
    fn test_parse_bare_fence() {
        let reply = "  ```\n{\"imo_number\": \"9876543\"}\n```  ";
        let record = parse_raw_record(reply).unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_raw_record("[1, 2]"),
            Err(ExtractionError::NotAnObject("array"))
        ));
        assert!(matches!(
            parse_raw_record("null"),
            Err(ExtractionError::NotAnObject("null"))
        ));
        assert!(matches!(
            parse_raw_record("\"M/V STAR\""),
            Err(ExtractionError::NotAnObject("string"))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_object() {
        assert!(matches!(parse_raw_record("{}"), Err(ExtractionError::NoData)));
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(matches!(
            parse_raw_record("I could not find a contract."),
            Err(ExtractionError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_prompt_lists_every_field() {
        let schema = FieldSchema::compact();
        let prompt = schema.extraction_prompt("THIS CHARTER PARTY is made on 15 January 2024");

        assert!(prompt.contains("CONTRACT TEXT:\nTHIS CHARTER PARTY"));
        for name in schema.field_names() {
            assert!(prompt.contains(&format!("\"{}\":", name)), "missing {}", name);
        }
        assert!(prompt.contains("\"daily_hire_rate_usd\": \"Daily hire rate in USD (numeric only) (currency)\""));
        assert!(prompt.ends_with("no other text or explanation."));
    }

    #[test]
    fn test_prompt_escapes_captions() {
        let prompt = FieldSchema::extended().extraction_prompt("");
        assert!(prompt.contains("\"CAN OFFHIRE BE ADDED?(CL 4(B))\":"));
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens("one two three four five six seven eight nine ten"), 13);
        assert_eq!(estimate_tokens(""), 0);
    }
}
