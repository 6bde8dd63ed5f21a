//! OCR collaborator interface.
//!
//! Recognition itself happens outside this crate. An [`OcrEngine`] turns one
//! input file into raw text; the extraction pipeline only ever sees that text.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcrError;

/// Result of OCR processing on one input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Full recognized text.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for OCR engines.
pub trait OcrEngine {
    /// Engine name for logs.
    fn name(&self) -> &str;

    /// Recognize the text of one input file.
    fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError>;
}

/// Engine reading text that an external OCR run already produced.
///
/// A `.txt` input is taken as the recognized text itself. For any other
/// input (an image) the text is read from the sibling file with the same
/// stem and a `.txt` extension, the layout `tesseract <image> <stem>` writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileOcr;

impl TextFileOcr {
    pub fn new() -> Self {
        Self
    }

    /// Location of the text for `path`.
    pub fn text_path(path: &Path) -> PathBuf {
        let is_text = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
        if is_text {
            path.to_path_buf()
        } else {
            path.with_extension("txt")
        }
    }
}

impl OcrEngine for TextFileOcr {
    fn name(&self) -> &str {
        "text-file"
    }

    fn recognize(&self, path: &Path) -> Result<OcrResult, OcrError> {
        let start = Instant::now();

        if !path.exists() {
            return Err(OcrError::NotFound(path.to_path_buf()));
        }

        let text_path = Self::text_path(path);
        if !text_path.exists() {
            return Err(OcrError::NoText(path.to_path_buf()));
        }

        // Blank text is still a result; extraction reports what is missing
        let text = fs::read_to_string(&text_path)?;

        debug!("Read {} characters from {}", text.len(), text_path.display());

        Ok(OcrResult {
            text,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_is_read_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.txt");
        fs::write(&path, "Rechnungsnummer: R-1").unwrap();

        let result = TextFileOcr::new().recognize(&path).unwrap();
        assert_eq!(result.text, "Rechnungsnummer: R-1");
    }

    #[test]
    fn test_image_uses_sidecar_text() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("scan.png");
        fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();
        fs::write(dir.path().join("scan.txt"), "Total: 5,00").unwrap();

        let result = TextFileOcr::new().recognize(&image).unwrap();
        assert_eq!(result.text, "Total: 5,00");
    }

    #[test]
    fn test_missing_input_and_missing_text() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("scan.jpg");

        assert!(matches!(
            TextFileOcr::new().recognize(&image),
            Err(OcrError::NotFound(_))
        ));

        fs::write(&image, b"jpeg").unwrap();
        assert!(matches!(
            TextFileOcr::new().recognize(&image),
            Err(OcrError::NoText(_))
        ));
    }

    #[test]
    fn test_blank_text_is_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.TXT");
        fs::write(&path, "  \n ").unwrap();

        let result = TextFileOcr::new().recognize(&path).unwrap();
        assert_eq!(result.text, "  \n ");
    }
}
