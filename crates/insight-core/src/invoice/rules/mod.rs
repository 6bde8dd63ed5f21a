//! Rule-based field extractors for invoice text.
//!
//! Each extractor is independent of the others and never fails: no match,
//! or a match that cannot be parsed, is simply `None`.

pub mod amounts;
pub mod dates;
pub mod invoice_number;
pub mod patterns;
pub mod supplier;
pub mod tax_rate;

pub use amounts::{extract_total_amount, normalize_amount, AmountExtractor};
pub use dates::{extract_invoice_date, normalize_date, DateExtractor, DATE_FORMATS};
pub use invoice_number::{extract_invoice_number, InvoiceNumberExtractor};
pub use supplier::{extract_supplier, SupplierExtractor};
pub use tax_rate::{extract_tax_rate, TaxRateExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Name of the record field this extractor fills.
    fn field(&self) -> &'static str;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
