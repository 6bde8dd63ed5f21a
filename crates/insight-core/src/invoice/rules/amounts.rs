//! Total amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::FieldExtractor;
use super::patterns::TOTAL_AMOUNT;

/// Total amount extractor.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Decimal;

    fn field(&self) -> &'static str {
        "total_amount"
    }

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = TOTAL_AMOUNT.captures(text)?;
        normalize_amount(&caps[1])
    }
}

/// Extract the labeled total amount from invoice text.
pub fn extract_total_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract(text)
}

/// Parse an amount written with `.` as thousands separator and `,` as
/// decimal separator (e.g. "1.234,56").
///
/// Every `.` is dropped before `,` becomes the decimal point, so an amount
/// written with a decimal point ("1234.56") comes out a hundred times too
/// large. Only this one convention is supported. Values outside the
/// 28-digit range of [`Decimal`] are absent.
pub fn normalize_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(normalize_amount("1234,56"), Some(dec("1234.56")));
        assert_eq!(normalize_amount("12.345.678,90"), Some(dec("12345678.90")));
        assert_eq!(normalize_amount("250"), Some(dec("250")));
        assert_eq!(normalize_amount("abc"), None);
        assert_eq!(normalize_amount(""), None);
    }

    #[test]
    fn test_decimal_point_is_treated_as_grouping() {
        assert_eq!(normalize_amount("1234.56"), Some(dec("123456")));
    }

    #[test]
    fn test_edge_separators() {
        assert_eq!(normalize_amount(",5"), Some(dec("0.5")));
        assert_eq!(normalize_amount("5,"), Some(dec("5")));
    }

    #[test]
    fn test_amount_beyond_decimal_range_is_absent() {
        assert_eq!(
            extract_total_amount("Total: 123.456.789.012.345.678.901.234.567.890,00"),
            None
        );
    }

    #[test]
    fn test_extract_total_amount() {
        assert_eq!(
            extract_total_amount("Gesamtbetrag: 1.500,00\nMwSt: 19%"),
            Some(dec("1500.00"))
        );
        assert_eq!(extract_total_amount("TOTAL 99,95 EUR"), Some(dec("99.95")));
        assert_eq!(extract_total_amount("amount:12,5"), Some(dec("12.5")));
    }

    #[test]
    fn test_first_labeled_amount_wins() {
        let text = "Amount: 10,00\nTotal: 20,00";
        assert_eq!(extract_total_amount(text), Some(dec("10.00")));
    }

    #[test]
    fn test_label_without_number_is_skipped() {
        // "Total" is followed by a word, so the later "Amount" label matches
        assert_eq!(
            extract_total_amount("Total Amount: 42,00"),
            Some(dec("42.00"))
        );
    }

    #[test]
    fn test_unparseable_amount_is_absent() {
        assert_eq!(extract_total_amount("Total: 1,2,3"), None);
        assert_eq!(extract_total_amount("no amounts here"), None);
    }
}
