//! Show command - print one stored invoice.

use clap::Args;

use insight_core::SqliteStore;

use super::{load_config, to_json};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Invoice id
    id: i64,
}

pub fn run(args: ShowArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = SqliteStore::open(&config.storage.database_path)?;

    let Some(invoice) = store.get(args.id)? else {
        anyhow::bail!("Invoice not found: {}", args.id);
    };

    println!("{}", to_json(&invoice, &config)?);
    Ok(())
}
