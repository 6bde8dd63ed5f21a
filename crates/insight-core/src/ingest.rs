//! Upload handling: OCR, extraction, rejection policy, summary code and
//! persistence for one uploaded file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{InsightError, Result};
use crate::models::config::IngestConfig;
use crate::models::invoice::InvoiceRecord;
use crate::ocr::OcrEngine;
use crate::pipeline::process_report;
use crate::store::{NewInvoice, SqliteStore};
use crate::summary::{code_file_name, SummaryCodeRenderer, SummaryPayload};
use crate::validate::Violation;

/// Outcome of a successful ingest.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    /// Id of the stored row.
    pub id: i64,
    /// Sanitized file name the row was stored under.
    pub filename: String,
    /// Extracted record.
    pub record: InvoiceRecord,
    /// Violations that were accepted under the configured policy.
    pub violations: Vec<Violation>,
    /// Encoded summary code payload.
    pub payload: String,
    /// Rendered summary code, when a renderer is configured.
    pub code_path: Option<PathBuf>,
}

/// Runs uploaded files through the pipeline and into the store.
pub struct Ingestor<'a> {
    ocr: &'a dyn OcrEngine,
    renderer: Option<&'a dyn SummaryCodeRenderer>,
    store: &'a SqliteStore,
    config: IngestConfig,
}

impl<'a> Ingestor<'a> {
    pub fn new(ocr: &'a dyn OcrEngine, store: &'a SqliteStore, config: IngestConfig) -> Self {
        Self {
            ocr,
            renderer: None,
            store,
            config,
        }
    }

    /// Render a summary code for every stored invoice.
    pub fn with_renderer(mut self, renderer: &'a dyn SummaryCodeRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Ingest the file at `path`.
    pub fn ingest(&self, path: &Path) -> Result<IngestOutcome> {
        let original = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let filename = sanitize_filename(original)
            .ok_or_else(|| InsightError::InvalidFileName(original.to_string()))?;

        info!("Ingesting {} with {}", filename, self.ocr.name());
        let ocr = self.ocr.recognize(path)?;

        let report = process_report(&ocr.text);
        if !report.is_valid() {
            if self.config.reject_invalid {
                warn!("Rejecting {}: {} violation(s)", filename, report.violations.len());
                return Err(InsightError::Rejected {
                    violations: report.violations,
                });
            }
            for violation in &report.violations {
                warn!("Accepting {} despite: {}", filename, violation);
            }
        }

        let payload = SummaryPayload::from_record(&report.record).encode()?;
        let code_path = match self.renderer {
            Some(renderer) => {
                std::fs::create_dir_all(&self.config.output_dir)?;
                let dest = self.config.output_dir.join(code_file_name(&filename));
                renderer.render(&payload, &dest)?;
                Some(dest)
            }
            None => None,
        };

        let id = self.store.insert(&NewInvoice {
            filename: filename.clone(),
            record: report.record.clone(),
            raw_text: self.config.store_raw_text.then_some(ocr.text),
        })?;

        info!("Stored {} as invoice {}", filename, id);

        Ok(IngestOutcome {
            id,
            filename,
            record: report.record,
            violations: report.violations,
            payload,
            code_path,
        })
    }
}

/// Reduce an uploaded file name to a safe, flat name.
///
/// Path components are dropped, whitespace becomes `_`, and only ASCII
/// alphanumerics, `.`, `-` and `_` are kept. Leading dots and underscores
/// are stripped. Returns `None` when nothing usable is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']).trim_end_matches('.');
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}
