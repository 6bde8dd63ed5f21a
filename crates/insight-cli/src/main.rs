//! CLI application for invoice extraction and archiving.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, ingest, list, process, show};

/// Invoice insight - Extract, validate and archive invoice data from OCR text
#[derive(Parser)]
#[command(name = "insight")]
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
    /// Extract and validate a single invoice without storing it
    Process(process::ProcessArgs),

    /// Extract, validate and store invoices
    Ingest(ingest::IngestArgs),

    /// Extract data from multiple invoice files
    Batch(batch::BatchArgs),

    /// List stored invoices
    List(list::ListArgs),

    /// Show one stored invoice
    Show(show::ShowArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
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
        Commands::Process(args) => process::run(args, config_path),
        Commands::Ingest(args) => ingest::run(args, config_path),
        Commands::Batch(args) => batch::run(args, config_path),
        Commands::List(args) => list::run(args, config_path),
        Commands::Show(args) => show::run(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
