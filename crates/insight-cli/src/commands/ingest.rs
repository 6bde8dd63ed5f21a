//! Ingest command - extract, validate and store invoices.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::error;

use insight_core::{InsightError, Ingestor, QrCodeRenderer, SqliteStore, TextFileOcr};

use super::{load_config, to_json};

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// Input files (OCR text, or images with a sibling .txt)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Store invoices even when they fail validation
    #[arg(long)]
    accept_invalid: bool,

    /// Print the stored outcome as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: IngestArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.storage.database_path)?;

    let mut ingest_config = config.ingest.clone();
    if args.accept_invalid {
        ingest_config.reject_invalid = false;
    }

    let ocr = TextFileOcr::new();
    let renderer = QrCodeRenderer::new();
    let ingestor = Ingestor::new(&ocr, &store, ingest_config).with_renderer(&renderer);

    let mut failures = 0usize;
    for input in &args.inputs {
        match ingestor.ingest(input) {
            Ok(outcome) => {
                if args.json {
                    println!("{}", to_json(&outcome, &config)?);
                } else {
                    println!(
                        "{} {} stored as invoice {}",
                        style("✓").green(),
                        outcome.filename,
                        outcome.id
                    );
                    println!("  summary: {}", outcome.payload);
                    if let Some(code_path) = &outcome.code_path {
                        println!("  code:    {}", code_path.display());
                    }
                    for violation in &outcome.violations {
                        println!("  {} {}", style("!").yellow(), violation);
                    }
                }
            }
            Err(InsightError::Rejected { violations }) => {
                failures += 1;
                eprintln!(
                    "{} {} rejected:",
                    style("✗").red(),
                    input.display()
                );
                for violation in &violations {
                    eprintln!("  - {}", violation);
                }
            }
            Err(e) => {
                failures += 1;
                error!("Failed to ingest {}: {}", input.display(), e);
                eprintln!("{} {}: {}", style("✗").red(), input.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} file(s) not stored", failures, args.inputs.len());
    }

    Ok(())
}
