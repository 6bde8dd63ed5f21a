//! List command - show stored invoices.

use clap::Args;
use console::style;

use insight_core::SqliteStore;

use super::{load_config, to_json};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.storage.database_path)?;
    let rows = store.list()?;

    if args.json {
        println!("{}", to_json(&rows, &config)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{} No invoices stored.", style("ℹ").blue());
        return Ok(());
    }

    println!(
        "{:>5}  {:<24}  {:<20}  {:<10}  {:>12}",
        "ID", "FILE", "NUMBER", "DATE", "TOTAL"
    );
    for row in &rows {
        println!(
            "{:>5}  {:<24}  {:<20}  {:<10}  {:>12}",
            row.id,
            row.filename,
            row.invoice_number.as_deref().unwrap_or("-"),
            row.invoice_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            row.total_amount.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}
