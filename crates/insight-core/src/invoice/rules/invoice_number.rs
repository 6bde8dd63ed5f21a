//! Invoice number extraction.

use regex::Regex;

use super::FieldExtractor;
use super::patterns::{INVOICE_NUMBER_BARE, INVOICE_NUMBER_LABELED};

/// Invoice number extractor.
///
/// Tries the explicit labels ("Rechnungsnummer", "Invoice Number",
/// "Invoice No.") before the bare "Nr." label; the first pattern with a
/// match decides the result.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }

    fn patterns() -> [&'static Regex; 2] {
        [&*INVOICE_NUMBER_LABELED, &*INVOICE_NUMBER_BARE]
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        "invoice_number"
    }

    fn extract(&self, text: &str) -> Option<Self::Output> {
        Self::patterns()
            .into_iter()
            .find_map(|pattern| pattern.captures(text))
            .map(|caps| caps[1].trim().to_string())
    }
}

/// Extract the invoice number from invoice text.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text)
}
