//! Shared output formatting for records and tables.

use std::io::Write;

use charter_core::models::config::OutputConfig;
use charter_core::{CanonicalRecord, ContractTable};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Render one record in the requested format.
///
/// CSV and text use the two-column field/value view.
pub fn format_record(
    record: &CanonicalRecord,
    format: OutputFormat,
    config: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_record_csv(record, config),
        OutputFormat::Text => Ok(format_record_text(record, config)),
    }
}

fn format_record_csv(record: &CanonicalRecord, config: &OutputConfig) -> anyhow::Result<String> {
    let mut wtr = csv_writer(vec![], config)?;

    wtr.write_record(["Field", "Value"])?;
    for (label, value) in record.to_flat_view() {
        wtr.write_record([label, value.render(&config.absent_marker)])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_record_text(record: &CanonicalRecord, config: &OutputConfig) -> String {
    let rows = record.to_flat_view();
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);

    let mut output = String::new();
    for (label, value) in rows {
        output.push_str(&format!(
            "{:<width$}  {}\n",
            label,
            value.render(&config.absent_marker),
            width = width
        ));
    }
    output
}

/// Write a table as CSV: one header row, then one row per record.
pub fn write_table_csv<W: Write>(
    table: &ContractTable,
    writer: W,
    config: &OutputConfig,
) -> anyhow::Result<()> {
    let mut wtr = csv_writer(writer, config)?;

    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|value| value.render(&config.absent_marker)))?;
    }

    wtr.flush()?;
    Ok(())
}

fn csv_writer<W: Write>(writer: W, config: &OutputConfig) -> anyhow::Result<csv::Writer<W>> {
    let delimiter = u8::try_from(config.csv_delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            anyhow::anyhow!("CSV delimiter must be an ASCII character: {:?}", config.csv_delimiter)
        })?;

    Ok(csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer))
}
