//! Schema command - show the active field schema.

use clap::Args;

use super::SchemaArg;

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    /// Built-in schema to show (overrides config)
    #[arg(short, long, value_enum)]
    schema: Option<SchemaArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: SchemaFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SchemaFormat {
    /// Loadable schema JSON
    Json,
    /// Field table
    Text,
}

pub async fn run(args: SchemaArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::with_schema(super::load_config(config_path)?, args.schema);
    let schema = config.schema()?;

    match args.format {
        SchemaFormat::Json => println!("{}", serde_json::to_string_pretty(&schema)?),
        SchemaFormat::Text => {
            println!(
                "Schema: {} ({} fields, search: {}, sort: {})",
                schema.name(),
                schema.len(),
                schema.search_field(),
                schema.sort_field()
            );
            println!();

            let width = schema.field_names().map(|n| n.chars().count()).max().unwrap_or(0);
            for field in schema.fields() {
                println!("  {:<width$}  {}", field.name, field.kind, width = width);
            }
        }
    }

    Ok(())
}
