//! Error types for the insight-core library.
//!
//! Field extraction has no error path: a missing or unparseable field is
//! `None`. Everything here belongs to the collaborators around the core.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::Violation;

/// Main error type for the insight library.
#[derive(Error, Debug)]
pub enum InsightError {
    /// OCR collaborator failed; the pipeline never ran.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The ingest policy refused an invalid record.
    #[error("invoice rejected: {}", join_violations(.violations))]
    Rejected { violations: Vec<Violation> },

    /// The uploaded file name is unusable after sanitizing.
    #[error("invalid file name: {0:?}")]
    InvalidFileName(String),

    /// Summary code rendering failed.
    #[error("summary code rendering failed: {0}")]
    Render(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by an OCR collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The input file does not exist.
    #[error("input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No recognized text is available for the input.
    #[error("no text available for {}", .0.display())]
    NoText(PathBuf),

    /// I/O error while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the invoice record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite reported an error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored column could not be decoded.
    #[error("corrupt value in column {column}: {value}")]
    Corrupt { column: &'static str, value: String },

    /// The connection mutex was poisoned by a panicking writer.
    #[error("store connection poisoned")]
    Poisoned,

    /// Creating the database directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result type for the insight library.
pub type Result<T> = std::result::Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_lists_violations() {
        let err = InsightError::Rejected {
            violations: vec![Violation::MissingInvoiceNumber, Violation::InvalidTotalAmount],
        };
        assert_eq!(
            err.to_string(),
            "invoice rejected: invoice number missing. total amount is invalid or missing."
        );
    }
}
