//! CLI application for Time Charter Party contract standardization.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, query, schema, standardize, text};

/// Charter party standardization - normalize extracted TCP contract fields
#[derive(Parser)]
#[command(name = "charter")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Standardize a single extracted record
    Standardize(standardize::StandardizeArgs),

    /// Standardize many records into a contract table
    Batch(batch::BatchArgs),

    /// Search a contract store by vessel name
    Query(query::QueryArgs),

    /// Extract contract text from a PDF
    Text(text::TextArgs),

    /// Show the active field schema
    Schema(schema::SchemaArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Standardize(args) => standardize::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Query(args) => query::run(args, config_path).await,
        Commands::Text(args) => text::run(args, config_path).await,
        Commands::Schema(args) => schema::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
