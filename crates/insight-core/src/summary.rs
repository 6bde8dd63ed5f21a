//! Scannable summary code payload and its QR rendering.

use std::path::Path;

use chrono::NaiveDate;
use image::{ImageFormat, Luma};
use qrcode::QrCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{InsightError, Result};
use crate::models::invoice::InvoiceRecord;

/// The fields encoded into an invoice's summary code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryPayload {
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub total_amount: Option<Decimal>,
    pub supplier: Option<String>,
}

impl SummaryPayload {
    pub fn from_record(record: &InvoiceRecord) -> Self {
        Self {
            invoice_number: record.invoice_number.clone(),
            invoice_date: record.invoice_date,
            total_amount: record.total_amount,
            supplier: record.supplier.clone(),
        }
    }

    /// Compact JSON text placed into the code.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Renders a payload into an image file (e.g. a QR code).
pub trait SummaryCodeRenderer {
    fn render(&self, payload: &str, dest: &Path) -> Result<()>;
}

/// Renders payloads as PNG QR codes.
#[derive(Debug, Clone, Copy)]
pub struct QrCodeRenderer {
    min_size: u32,
}

impl QrCodeRenderer {
    pub fn new() -> Self {
        Self { min_size: 200 }
    }
}

impl Default for QrCodeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryCodeRenderer for QrCodeRenderer {
    fn render(&self, payload: &str, dest: &Path) -> Result<()> {
        let code = QrCode::new(payload.as_bytes())
            .map_err(|e| InsightError::Render(e.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();
        image
            .save_with_format(dest, ImageFormat::Png)
            .map_err(|e| InsightError::Render(e.to_string()))?;

        debug!(
            "Rendered {}x{} summary code to {}",
            image.width(),
            image.height(),
            dest.display()
        );
        Ok(())
    }
}

/// Image file name used for the summary code of an uploaded file.
pub fn code_file_name(upload_name: &str) -> String {
    let stem = Path::new(upload_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(upload_name);
    format!("qr_{stem}.png")
}
