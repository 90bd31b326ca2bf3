//! Row/column view over a set of canonical records.

use serde::Serialize;

use crate::models::record::{CanonicalRecord, FieldValue};

use super::schema::FieldSchema;

static ABSENT: FieldValue = FieldValue::Absent;

/// Canonical records laid out as rows under a fixed column order.
///
/// Columns are the schema fields that appear in at least one record, in
/// declaration order, followed by any other fields in first-seen order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContractTable {
    columns: Vec<String>,
    rows: Vec<Vec<FieldValue>>,
}

impl ContractTable {
    /// Lay out `records` against `schema`. Row order follows input order.
    pub fn from_records(records: &[CanonicalRecord], schema: &FieldSchema) -> Self {
        let mut columns: Vec<String> = schema
            .field_names()
            .filter(|name| records.iter().any(|r| r.contains(name)))
            .map(String::from)
            .collect();

        for record in records {
            for name in record.names() {
                if !schema.contains(name) && !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).unwrap_or(&ABSENT).clone())
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<FieldValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` under `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }
}
