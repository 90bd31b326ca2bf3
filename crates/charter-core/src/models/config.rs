//! Configuration structures for the standardization pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CharterError, Result};
use crate::standardize::{FieldSchema, SchemaVariant, Standardizer};

/// Main configuration for the charter pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharterConfig {
    /// Field standardization configuration.
    pub standardization: StandardizationConfig,

    /// PDF text extraction configuration.
    pub pdf: PdfConfig,

    /// Export/display configuration.
    pub output: OutputConfig,
}

/// Field standardization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizationConfig {
    /// Built-in schema variant.
    pub schema: SchemaVariant,

    /// Custom schema file; overrides `schema` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<PathBuf>,

    /// Decimal places kept for currency fields.
    pub decimal_places: u32,
}

impl Default for StandardizationConfig {
    fn default() -> Self {
        Self {
            schema: SchemaVariant::Compact,
            schema_path: None,
            decimal_places: 2,
        }
    }
}

/// PDF text extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Insert `--- Page N ---` markers between pages.
    pub page_separators: bool,

    /// Maximum consecutive blank lines kept in extracted text.
    pub max_blank_lines: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_separators: true,
            max_blank_lines: 1,
        }
    }
}

/// Export and display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Text shown for absent values.
    pub absent_marker: String,

    /// CSV field delimiter.
    pub csv_delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            absent_marker: crate::models::record::ABSENT_MARKER.to_string(),
            csv_delimiter: ',',
        }
    }
}

impl CharterConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Resolve the active schema: the custom file if configured, else the
    /// built-in variant.
    pub fn schema(&self) -> Result<FieldSchema> {
        match &self.standardization.schema_path {
            Some(path) => FieldSchema::from_file(path),
            None => Ok(self.standardization.schema.schema()),
        }
    }

    /// Build a standardizer for the active schema.
    pub fn standardizer(&self) -> Result<Standardizer> {
        if self.standardization.decimal_places > 10 {
            return Err(CharterError::Config(format!(
                "decimal_places must be at most 10, got {}",
                self.standardization.decimal_places
            )));
        }

        Ok(Standardizer::new(self.schema()?)
            .with_decimal_places(self.standardization.decimal_places))
    }
}
