//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod query;
pub mod schema;
pub mod standardize;
pub mod text;

use std::path::Path;

use charter_core::{CharterConfig, SchemaVariant, Standardizer};
use tracing::debug;

/// Built-in schema choice on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SchemaArg {
    /// 33 snake_case fields
    Compact,
    /// 53 spreadsheet captions
    Extended,
}

impl From<SchemaArg> for SchemaVariant {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Compact => SchemaVariant::Compact,
            SchemaArg::Extended => SchemaVariant::Extended,
        }
    }
}

/// Load the config named by `-c`, else the user config file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CharterConfig> {
    if let Some(path) = config_path {
        return Ok(CharterConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        return Ok(CharterConfig::from_file(&default_path)?);
    }

    Ok(CharterConfig::default())
}

/// Apply a `--schema` override to the loaded config.
pub fn with_schema(mut config: CharterConfig, schema: Option<SchemaArg>) -> CharterConfig {
    if let Some(schema) = schema {
        config.standardization.schema = schema.into();
        config.standardization.schema_path = None;
    }
    config
}

/// Standardizer for the active schema.
pub fn standardizer(config: &CharterConfig) -> anyhow::Result<Standardizer> {
    let standardizer = config.standardizer()?;
    debug!(
        "Using {} schema with {} fields",
        standardizer.schema().name(),
        standardizer.schema().len()
    );
    Ok(standardizer)
}
