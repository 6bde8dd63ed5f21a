//! Process command - extract and validate a single invoice.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use insight_core::{process_report, InsightConfig, OcrEngine, ProcessReport, TextFileOcr};

use super::{load_config, to_json};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (OCR text, or an image with a sibling .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let ocr = TextFileOcr::new().recognize(&args.input)?;
    let report = process_report(&ocr.text);

    // Validation is advisory here; report it on stderr
    if !report.is_valid() {
        eprintln!("{}", style("Validation issues:").yellow());
        for violation in &report.violations {
            eprintln!("  - {}", violation);
        }
    }

    let output = format_report(&report, args.format, &config)?;

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_report(
    report: &ProcessReport,
    format: OutputFormat,
    config: &InsightConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(report, config),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

pub fn format_csv(report: &ProcessReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_number",
        "invoice_date",
        "total_amount",
        "supplier",
        "tax_rate",
        "violations",
    ])?;

    let record = &report.record;
    wtr.write_record([
        record.invoice_number.clone().unwrap_or_default(),
        record.invoice_date.map(|d| d.to_string()).unwrap_or_default(),
        record.total_amount.map(|a| a.to_string()).unwrap_or_default(),
        record.supplier.clone().unwrap_or_default(),
        record.tax_rate.map(|r| r.to_string()).unwrap_or_default(),
        join_violations(report),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(report: &ProcessReport) -> String {
    let record = &report.record;
    let missing = "-".to_string();
    let mut output = String::new();

    output.push_str(&format!(
        "Invoice:  {}\n",
        record.invoice_number.as_ref().unwrap_or(&missing)
    ));
    output.push_str(&format!(
        "Date:     {}\n",
        record.invoice_date.map(|d| d.to_string()).unwrap_or_else(|| missing.clone())
    ));
    output.push_str(&format!(
        "Supplier: {}\n",
        record.supplier.as_ref().unwrap_or(&missing)
    ));
    output.push_str(&format!(
        "Total:    {}\n",
        record.total_amount.map(|a| a.to_string()).unwrap_or_else(|| missing.clone())
    ));
    output.push_str(&format!(
        "Tax rate: {}\n",
        record.tax_rate.map(|r| format!("{}%", r)).unwrap_or_else(|| missing.clone())
    ));

    if report.is_valid() {
        output.push_str("\nValid\n");
    } else {
        output.push_str("\nViolations:\n");
        for violation in &report.violations {
            output.push_str(&format!("  - {}\n", violation));
        }
    }

    output
}

fn join_violations(report: &ProcessReport) -> String {
    report
        .violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
