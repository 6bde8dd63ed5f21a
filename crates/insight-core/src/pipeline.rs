//! Extraction and validation pipeline.
//!
//! Validation here is advisory: violations are reported but never stop a
//! record from being returned. Whether an invalid record is refused is up to
//! the caller (see [`crate::ingest`]).

use serde::Serialize;
use tracing::{info, warn};

use crate::invoice::assemble;
use crate::models::invoice::InvoiceRecord;
use crate::validate::{validate, Violation};

/// A record together with the violations found on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessReport {
    /// Extracted record.
    pub record: InvoiceRecord,
    /// Violations in check order; empty when the record is valid.
    pub violations: Vec<Violation>,
}

impl ProcessReport {
    /// Check if the record passed every rule.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Extract and validate one text blob, logging violations.
pub fn process(text: &str) -> InvoiceRecord {
    let report = process_report(text);
    for violation in &report.violations {
        warn!("Validation: {}", violation);
    }
    report.record
}

/// Extract and validate one text blob, returning both results.
pub fn process_report(text: &str) -> ProcessReport {
    let record = assemble(text);
    let violations = validate(&record);

    info!(
        "Extracted {} of 5 fields, {} violation(s)",
        5 - record.missing_fields().len(),
        violations.len()
    );

    ProcessReport { record, violations }
}
