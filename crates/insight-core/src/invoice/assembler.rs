//! Rule-based invoice assembler.

use tracing::{debug, trace};

use crate::models::invoice::InvoiceRecord;

use super::InvoiceExtractor;
use super::rules::{
    AmountExtractor, DateExtractor, FieldExtractor, InvoiceNumberExtractor, SupplierExtractor,
    TaxRateExtractor,
};

/// Run every field extractor over one text blob and collect the results.
///
/// Extractors share no state, so the order they run in has no effect on the
/// record.
pub fn assemble(text: &str) -> InvoiceRecord {
    trace!("Assembling invoice from {} characters of text", text.len());

    InvoiceRecord {
        invoice_number: run(&InvoiceNumberExtractor, text),
        invoice_date: run(&DateExtractor, text),
        total_amount: run(&AmountExtractor, text),
        supplier: run(&SupplierExtractor, text),
        tax_rate: run(&TaxRateExtractor, text),
    }
}

fn run<E: FieldExtractor>(extractor: &E, text: &str) -> Option<E::Output> {
    let value = extractor.extract(text);
    if value.is_none() {
        debug!("No value extracted for {}", extractor.field());
    }
    value
}

/// [`InvoiceExtractor`] backed by the pattern rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl InvoiceExtractor for RuleBasedExtractor {
    fn extract(&self, text: &str) -> InvoiceRecord {
        assemble(text)
    }
}
