//! Core library for invoice text extraction.
//!
//! This crate provides:
//! - Field extraction from OCR text (invoice number, date, total, supplier, tax rate)
//! - Business-rule validation of the extracted record
//! - Summary code payloads for stored invoices, rendered as QR images
//! - An append-only SQLite record store and the upload ingest workflow

pub mod error;
pub mod ingest;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod store;
pub mod summary;
pub mod validate;

pub use error::{InsightError, OcrError, Result, StoreError};
pub use ingest::{sanitize_filename, IngestOutcome, Ingestor};
pub use invoice::{assemble, InvoiceExtractor, RuleBasedExtractor};
pub use models::config::InsightConfig;
pub use models::invoice::InvoiceRecord;
pub use ocr::{OcrEngine, OcrResult, TextFileOcr};
pub use pipeline::{process, process_report, ProcessReport};
pub use store::{InvoiceSummaryRow, NewInvoice, SqliteStore, StoredInvoice};
pub use summary::{QrCodeRenderer, SummaryCodeRenderer, SummaryPayload};
pub use validate::{validate, validate_at, Violation};
