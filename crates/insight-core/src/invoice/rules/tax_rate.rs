//! Tax rate extraction.

use super::FieldExtractor;
use super::patterns::TAX_RATE;

/// Tax rate extractor, for labels such as "MwSt: 19%".
pub struct TaxRateExtractor;

impl TaxRateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TaxRateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TaxRateExtractor {
    type Output = i32;

    fn field(&self) -> &'static str {
        "tax_rate"
    }

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = TAX_RATE.captures(text)?;
        caps[1].parse().ok()
    }
}

/// Extract the tax rate percentage from invoice text.
pub fn extract_tax_rate(text: &str) -> Option<i32> {
    TaxRateExtractor::new().extract(text)
}
