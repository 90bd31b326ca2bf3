//! Batch command - standardize many extracted records into one table.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use charter_core::{parse_raw_record, CanonicalRecord, ContractRepository, Standardizer};

use super::output::write_table_csv;
use super::SchemaArg;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Raw record files or glob pattern (e.g. "extracted/*.json")
    #[arg(required = true)]
    input: String,

    /// Output CSV table
    #[arg(short, long, default_value = "contracts.csv")]
    output: PathBuf,

    /// Contract store (JSON); existing contracts are kept and new ones appended
    #[arg(long)]
    store: Option<PathBuf>,

    /// Built-in schema to apply (overrides config)
    #[arg(short, long, value_enum)]
    schema: Option<SchemaArg>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::with_schema(super::load_config(config_path)?, args.schema);
    let standardizer = super::standardizer(&config)?;
    let schema = standardizer.schema();

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("json")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let mut repository = match &args.store {
        Some(path) if path.exists() => {
            let repository = ContractRepository::load(path, schema)?;
            info!("Appending to {} stored contracts", repository.len());
            repository
        }
        _ => ContractRepository::new(schema),
    };
    let stored_before = repository.len();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        match process_single_file(&path, &standardizer) {
            Ok(record) => {
                let source = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                repository.add(record, source);
                results.push(ProcessResult { path, error: None });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        error: Some(error_msg),
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let table = repository.to_table(schema);
    write_table_csv(&table, fs::File::create(&args.output)?, &config.output)?;
    println!(
        "{} Table with {} contracts written to {}",
        style("✓").green(),
        table.len(),
        args.output.display()
    );

    if let Some(store) = &args.store {
        repository.save(store)?;
        println!(
            "{} Contract store written to {}",
            style("✓").green(),
            store.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let stats = repository.stats();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(repository.len() - stored_before).green(),
        style(failed.len()).red()
    );
    println!(
        "   {} contracts stored, {} unique vessels",
        stats.total_contracts, stats.unique_vessels
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &Path, standardizer: &Standardizer) -> anyhow::Result<CanonicalRecord> {
    let content = fs::read_to_string(path)?;
    let raw = parse_raw_record(&content)?;

    let report = standardizer.standardize_with_report(&raw);
    debug!(
        "{}: {}/{} fields populated",
        path.display(),
        report.populated(),
        standardizer.schema().len()
    );

    if !report.unknown_fields.is_empty() {
        warn!(
            "{}: ignoring {} fields not in schema",
            path.display(),
            report.unknown_fields.len()
        );
    }

    Ok(report.record)
}
