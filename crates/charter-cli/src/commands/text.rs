//! Text command - extract contract text from a PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use charter_core::estimate_tokens;
use charter_core::pdf::{PdfExtractor, PdfProcessor};

use super::SchemaArg;

/// Arguments for the text command.
#[derive(Args)]
pub struct TextArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the text in the field-extraction prompt for the active schema
    #[arg(long)]
    prompt: bool,

    /// Built-in schema for the prompt (overrides config)
    #[arg(short, long, value_enum)]
    schema: Option<SchemaArg>,
}

pub async fn run(args: TextArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::with_schema(super::load_config(config_path)?, args.schema);

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "pdf" {
        anyhow::bail!("Unsupported file format: {}", extension);
    }

    info!("Extracting text from {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Loading PDF...");

    let data = fs::read(&args.input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    pb.set_message("Extracting text...");
    let content = extractor.extract_all(&config.pdf)?;
    pb.finish_and_clear();

    if content.text.trim().is_empty() {
        anyhow::bail!("No text extracted from PDF (scanned documents are not supported)");
    }

    let output = if args.prompt {
        config.schema()?.extraction_prompt(&content.text)
    } else {
        content.text
    };

    eprintln!(
        "{} {} pages, {} characters, ~{} tokens",
        style("ℹ").blue(),
        content.pages.len(),
        output.chars().count(),
        estimate_tokens(&output)
    );

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

    Ok(())
}
