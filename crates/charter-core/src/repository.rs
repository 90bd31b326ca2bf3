//! In-memory store of processed contracts with vessel search.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::record::{CanonicalRecord, FieldValue};
use crate::standardize::{ContractTable, FieldSchema};

/// Metadata field naming the file a record came from.
pub const SOURCE_FILE_FIELD: &str = "_source_file";

/// Metadata field holding the RFC 3339 processing timestamp.
pub const PROCESSED_AT_FIELD: &str = "_processed_at";

/// Sort key used for records without a sort date; orders them last.
const MISSING_DATE: &str = "0000-00-00";

/// Summary counts for a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepositoryStats {
    pub total_contracts: usize,
    pub unique_vessels: usize,
}

/// Processed contracts, searchable by the schema's search field.
#[derive(Debug, Clone)]
pub struct ContractRepository {
    search_field: String,
    sort_field: String,
    records: Vec<CanonicalRecord>,
}

impl ContractRepository {
    /// Empty repository searching `schema`'s search field.
    pub fn new(schema: &FieldSchema) -> Self {
        Self {
            search_field: schema.search_field().to_string(),
            sort_field: schema.sort_field().to_string(),
            records: Vec::new(),
        }
    }

    /// Load records previously written with [`save`](Self::save).
    pub fn load(path: &Path, schema: &FieldSchema) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let records: Vec<CanonicalRecord> = serde_json::from_str(&content)?;
        debug!("Loaded {} contracts from {}", records.len(), path.display());

        Ok(Self {
            records,
            ..Self::new(schema)
        })
    }

    /// Write all records as a JSON array.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, content)?;
        info!("Saved {} contracts to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Store a record, stamping its source file and processing time.
    pub fn add(&mut self, mut record: CanonicalRecord, source_file: &str) {
        record.insert(SOURCE_FILE_FIELD, FieldValue::Text(source_file.to_string()));
        record.insert(
            PROCESSED_AT_FIELD,
            FieldValue::Text(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        self.records.push(record);
    }

    /// Records whose vessel name contains `name` (case-insensitive), newest
    /// first by the sort field. Records without a sort date come last.
    pub fn query_by_vessel(&self, name: &str) -> Vec<&CanonicalRecord> {
        let needle = name.to_lowercase();

        let mut matches: Vec<&CanonicalRecord> = self
            .records
            .iter()
            .filter(|record| {
                record
                    .get(&self.search_field)
                    .and_then(FieldValue::as_str)
                    .is_some_and(|vessel| vessel.to_lowercase().contains(&needle))
            })
            .collect();

        matches.sort_by(|a, b| self.sort_key(b).cmp(self.sort_key(a)));
        debug!("Vessel query {:?} matched {} contracts", name, matches.len());
        matches
    }

    fn sort_key<'a>(&self, record: &'a CanonicalRecord) -> &'a str {
        record
            .get(&self.sort_field)
            .and_then(FieldValue::as_str)
            .unwrap_or(MISSING_DATE)
    }

    pub fn all(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct vessel names, sorted.
    pub fn vessels(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .records
            .iter()
            .filter_map(|r| r.get(&self.search_field).and_then(FieldValue::as_str))
            .collect();
        names.into_iter().collect()
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            total_contracts: self.records.len(),
            unique_vessels: self.vessels().len(),
        }
    }

    /// Lay every stored record out as a table.
    pub fn to_table(&self, schema: &FieldSchema) -> ContractTable {
        ContractTable::from_records(&self.records, schema)
    }
}
