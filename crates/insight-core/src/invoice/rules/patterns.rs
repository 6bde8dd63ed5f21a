//! Common regex patterns for invoice field extraction.
//!
//! Labels are matched case-insensitively. German and English labels are
//! recognized side by side, matching the bilingual OCR output. Digit classes
//! are ASCII-only: `\d` would also match other scripts' digits, which the
//! numeric parsers reject.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice number, tried in this order
    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)(?:Rechnungsnummer|Invoice Number|Invoice No\.?):?\s*([A-Z0-9\-/]+)"
    ).unwrap();

    pub static ref INVOICE_NUMBER_BARE: Regex = Regex::new(
        r"(?i)Nr\.?\s*:\s*([A-Z0-9\-/]+)"
    ).unwrap();

    // Date shapes, day-first before year-first
    pub static ref DATE_DAY_FIRST: Regex = Regex::new(
        r"[0-9]{2}[./\-][0-9]{2}[./\-][0-9]{4}"
    ).unwrap();

    pub static ref DATE_YEAR_FIRST: Regex = Regex::new(
        r"[0-9]{4}[./\-][0-9]{2}[./\-][0-9]{2}"
    ).unwrap();

    // Total amount (e.g. "Gesamtbetrag: 1.234,56")
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)(?:Gesamtbetrag|Total|Amount):?\s*([0-9.,]+)"
    ).unwrap();

    // Supplier name, rest of the line
    pub static ref SUPPLIER: Regex = Regex::new(
        r"(?i)(?:Lieferant|Supplier):?\s*(.+)"
    ).unwrap();

    // Tax rate (e.g. "MwSt: 19%")
    pub static ref TAX_RATE: Regex = Regex::new(
        r"(?i)(?:MwSt|Tax Rate):?\s*([0-9]{1,2})%"
    ).unwrap();
}
