//! Standardize command - normalize a single extracted record.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use charter_core::parse_raw_record;

use super::output::{format_record, OutputFormat};
use super::SchemaArg;

/// Arguments for the standardize command.
#[derive(Args)]
pub struct StandardizeArgs {
    /// Raw record JSON (an extraction reply, code fences allowed)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Built-in schema to apply (overrides config)
    #[arg(short, long, value_enum)]
    schema: Option<SchemaArg>,

    /// Report missing, unparsed and unknown fields
    #[arg(long)]
    report: bool,
}

pub async fn run(args: StandardizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::with_schema(super::load_config(config_path)?, args.schema);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Standardizing record from {}", args.input.display());

    let content = fs::read_to_string(&args.input)?;
    let raw = parse_raw_record(&content)?;

    let standardizer = super::standardizer(&config)?;
    let report = standardizer.standardize_with_report(&raw);

    let output = format_record(&report.record, args.format, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.report {
        eprintln!();
        eprintln!(
            "{} {}/{} fields populated",
            style("ℹ").blue(),
            report.populated(),
            standardizer.schema().len()
        );
        print_field_list("Missing", &report.missing_fields);
        print_field_list("Unparsed", &report.unparsed_fields);
        print_field_list("Unknown", &report.unknown_fields);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn print_field_list(title: &str, fields: &[String]) {
    if fields.is_empty() {
        return;
    }

    eprintln!("{}", style(format!("{} ({}):", title, fields.len())).yellow());
    for field in fields {
        eprintln!("  - {}", field);
    }
}
