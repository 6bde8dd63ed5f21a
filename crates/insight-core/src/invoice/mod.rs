//! Invoice field extraction module.

mod assembler;
pub mod rules;

pub use assembler::{assemble, RuleBasedExtractor};

use crate::models::invoice::InvoiceRecord;

/// Trait for invoice field extractors.
pub trait InvoiceExtractor {
    /// Extract structured invoice fields from plain text.
    fn extract(&self, text: &str) -> InvoiceRecord;
}
