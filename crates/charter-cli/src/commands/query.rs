//! Query command - search a contract store by vessel name.

use std::path::PathBuf;

use clap::Args;
use console::style;

use charter_core::repository::SOURCE_FILE_FIELD;
use charter_core::{CanonicalRecord, ContractRepository, ContractTable};

use super::output::{write_table_csv, OutputFormat};
use super::SchemaArg;

/// Arguments for the query command.
#[derive(Args)]
pub struct QueryArgs {
    /// Contract store written by `batch --store`
    #[arg(required = true)]
    store: PathBuf,

    /// Vessel name or part of it (case-insensitive)
    #[arg(required = true)]
    vessel: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Built-in schema the store was built with (overrides config)
    #[arg(short, long, value_enum)]
    schema: Option<SchemaArg>,
}

pub async fn run(args: QueryArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::with_schema(super::load_config(config_path)?, args.schema);
    let schema = config.schema()?;

    if !args.store.exists() {
        anyhow::bail!("Contract store not found: {}", args.store.display());
    }

    let repository = ContractRepository::load(&args.store, &schema)?;
    let matches = repository.query_by_vessel(&args.vessel);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matches)?),
        OutputFormat::Csv => {
            let records: Vec<CanonicalRecord> = matches.into_iter().cloned().collect();
            let table = ContractTable::from_records(&records, &schema);
            write_table_csv(&table, std::io::stdout().lock(), &config.output)?;
        }
        OutputFormat::Text => {
            if matches.is_empty() {
                println!(
                    "{} No contracts found for vessel: {}",
                    style("ℹ").blue(),
                    args.vessel
                );
            } else {
                println!(
                    "{} Found {} contracts for vessel: {}",
                    style("✓").green(),
                    matches.len(),
                    args.vessel
                );
                for record in &matches {
                    let field = |name: &str| {
                        record
                            .get(name)
                            .map(|v| v.render(&config.output.absent_marker))
                            .unwrap_or_else(|| config.output.absent_marker.clone())
                    };
                    println!(
                        "  - {}  {}  ({})",
                        field(schema.sort_field()),
                        field(schema.search_field()),
                        field(SOURCE_FILE_FIELD)
                    );
                }
            }

            let stats = repository.stats();
            println!();
            println!(
                "{} {} contracts stored, {} unique vessels",
                style("ℹ").blue(),
                stats.total_contracts,
                stats.unique_vessels
            );
        }
    }

    Ok(())
}
