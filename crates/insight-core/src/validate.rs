//! Business rules applied to an assembled invoice record.

use std::fmt;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::models::invoice::InvoiceRecord;

/// Lowest accepted tax rate in percent.
pub const MIN_TAX_RATE: i32 = 0;
/// Highest accepted tax rate in percent.
pub const MAX_TAX_RATE: i32 = 100;

/// A failed business rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// No invoice number was extracted.
    MissingInvoiceNumber,
    /// The invoice date lies after today.
    FutureInvoiceDate,
    /// The total amount is missing, zero or negative.
    InvalidTotalAmount,
    /// The tax rate is outside 0..=100 percent.
    InvalidTaxRate,
}

impl Violation {
    /// Human-readable message for this violation.
    pub fn message(&self) -> &'static str {
        match self {
            Violation::MissingInvoiceNumber => "invoice number missing.",
            Violation::FutureInvoiceDate => "invoice date is in the future.",
            Violation::InvalidTotalAmount => "total amount is invalid or missing.",
            Violation::InvalidTaxRate => "tax rate is invalid.",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Validate a record against today's local date.
pub fn validate(record: &InvoiceRecord) -> Vec<Violation> {
    validate_at(record, Local::now().date_naive())
}

/// Validate a record as of `today`.
///
/// Checks run in a fixed order and each adds at most one violation, so the
/// result order is stable. An absent date is not a violation.
pub fn validate_at(record: &InvoiceRecord, today: NaiveDate) -> Vec<Violation> {
    let mut violations = Vec::new();

    if record.invoice_number.is_none() {
        violations.push(Violation::MissingInvoiceNumber);
    }

    if record.invoice_date.is_some_and(|date| date > today) {
        violations.push(Violation::FutureInvoiceDate);
    }

    if record.total_amount.is_none_or(|amount| amount <= Decimal::ZERO) {
        violations.push(Violation::InvalidTotalAmount);
    }

    if record
        .tax_rate
        .is_some_and(|rate| !(MIN_TAX_RATE..=MAX_TAX_RATE).contains(&rate))
    {
        violations.push(Violation::InvalidTaxRate);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    fn valid_record() -> InvoiceRecord {
        InvoiceRecord {
            invoice_number: Some("INV-1".to_string()),
            invoice_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            total_amount: Some(Decimal::new(100, 0)),
            supplier: None,
            tax_rate: Some(19),
        }
    }

    #[test]
    fn test_valid_record() {
        assert_eq!(validate_at(&valid_record(), today()), Vec::<Violation>::new());
    }

    #[test]
    fn test_negative_amount_is_the_only_violation() {
        let record = InvoiceRecord {
            total_amount: Some(Decimal::new(-5, 0)),
            ..valid_record()
        };
        assert_eq!(
            validate_at(&record, today()),
            vec![Violation::InvalidTotalAmount]
        );
    }

    #[test]
    fn test_zero_and_missing_amount() {
        let zero = InvoiceRecord {
            total_amount: Some(Decimal::ZERO),
            ..valid_record()
        };
        let missing = InvoiceRecord {
            total_amount: None,
            ..valid_record()
        };
        assert_eq!(validate_at(&zero, today()), vec![Violation::InvalidTotalAmount]);
        assert_eq!(validate_at(&missing, today()), vec![Violation::InvalidTotalAmount]);
    }

    #[test]
    fn test_future_date() {
        let record = InvoiceRecord {
            invoice_date: NaiveDate::from_ymd_opt(2025, 7, 2),
            ..valid_record()
        };
        assert_eq!(validate_at(&record, today()), vec![Violation::FutureInvoiceDate]);

        let same_day = InvoiceRecord {
            invoice_date: Some(today()),
            ..valid_record()
        };
        assert_eq!(validate_at(&same_day, today()), Vec::<Violation>::new());
    }

    #[test]
    fn test_absent_date_is_not_a_violation() {
        let record = InvoiceRecord {
            invoice_date: None,
            ..valid_record()
        };
        assert_eq!(validate_at(&record, today()), Vec::<Violation>::new());
    }

    #[test]
    fn test_tax_rate_bounds() {
        for rate in [0, 100] {
            let record = InvoiceRecord {
                tax_rate: Some(rate),
                ..valid_record()
            };
            assert_eq!(validate_at(&record, today()), Vec::<Violation>::new());
        }
        for rate in [-1, 101] {
            let record = InvoiceRecord {
                tax_rate: Some(rate),
                ..valid_record()
            };
            assert_eq!(validate_at(&record, today()), vec![Violation::InvalidTaxRate]);
        }
    }

    #[test]
    fn test_violations_follow_check_order() {
        let record = InvoiceRecord {
            invoice_number: None,
            invoice_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            total_amount: None,
            supplier: None,
            tax_rate: Some(150),
        };
        assert_eq!(
            validate_at(&record, today()),
            vec![
                Violation::MissingInvoiceNumber,
                Violation::FutureInvoiceDate,
                Violation::InvalidTotalAmount,
                Violation::InvalidTaxRate,
            ]
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(Violation::MissingInvoiceNumber.to_string(), "invoice number missing.");
        assert_eq!(
            serde_json::to_string(&Violation::InvalidTaxRate).unwrap(),
            r#""tax rate is invalid.""#
        );
    }

    #[test]
    fn test_validate_uses_current_date() {
        assert_eq!(validate(&valid_record()), Vec::<Violation>::new());
    }
}
