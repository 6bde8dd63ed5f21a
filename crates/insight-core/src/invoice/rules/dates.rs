//! Invoice date extraction.

use chrono::NaiveDate;
use regex::Regex;

use super::FieldExtractor;
use super::patterns::{DATE_DAY_FIRST, DATE_YEAR_FIRST};

/// Calendar formats accepted by [`normalize_date`], in priority order.
pub const DATE_FORMATS: [&str; 5] = ["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y.%m.%d"];

/// Invoice date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn shapes() -> [&'static Regex; 2] {
        [&*DATE_DAY_FIRST, &*DATE_YEAR_FIRST]
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn field(&self) -> &'static str {
        "invoice_date"
    }

    /// Only the first shape that matches is normalized. When that substring
    /// is not a real calendar date the field is absent, even if a later
    /// shape would have matched something valid.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let candidate = Self::shapes()
            .into_iter()
            .find_map(|shape| shape.find(text))?;
        normalize_date(candidate.as_str())
    }
}

/// Extract the first date-shaped substring from invoice text.
pub fn extract_invoice_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text)
}

/// Parse a date by trying each of [`DATE_FORMATS`] in turn.
pub fn normalize_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("31.12.2024"), Some(date(2024, 12, 31)));
        assert_eq!(normalize_date("31/12/2024"), Some(date(2024, 12, 31)));
        assert_eq!(normalize_date("31-12-2024"), Some(date(2024, 12, 31)));
        assert_eq!(normalize_date("2024-12-31"), Some(date(2024, 12, 31)));
        assert_eq!(normalize_date("2024.12.31"), Some(date(2024, 12, 31)));
    }

    #[test]
    fn test_normalize_date_rejects_invalid() {
        assert_eq!(normalize_date("31/13/2024"), None);
        assert_eq!(normalize_date("30.02.2024"), None);
        assert_eq!(normalize_date("2024/12/31"), None);
        assert_eq!(normalize_date("yesterday"), None);
    }

    #[test]
    fn test_extract_date_day_first() {
        assert_eq!(
            extract_invoice_date("Datum: 01.06.2025\nTotal: 5"),
            Some(date(2025, 6, 1))
        );
    }

    #[test]
    fn test_extract_date_year_first() {
        assert_eq!(
            extract_invoice_date("Invoice date 2024-01-15"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_day_first_shape_wins_over_earlier_year_first() {
        let text = "Printed 2024-01-15, issued 20.01.2024";
        assert_eq!(extract_invoice_date(text), Some(date(2024, 1, 20)));
    }

    #[test]
    fn test_invalid_first_match_does_not_fall_back() {
        // Known edge case: the day-first shape matches an impossible date,
        // so the valid year-first date further on is never considered.
        let text = "Ref 31/13/2024\nDate 2024-06-01";
        assert_eq!(extract_invoice_date(text), None);
    }

    #[test]
    fn test_mixed_separators_match_but_do_not_parse() {
        assert_eq!(extract_invoice_date("01.06-2025"), None);
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_date() {
        // Arabic-Indic digits do not form a date shape, so the ASCII one is found
        let text = "\u{660}\u{661}.\u{660}\u{666}.\u{662}\u{660}\u{662}\u{665}\n2025-06-01";
        assert_eq!(extract_invoice_date(text), Some(date(2025, 6, 1)));
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_invoice_date("Rechnungsnummer: 42"), None);
    }
}
