//! Invoice data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured fields extracted from the OCR text of one invoice.
///
/// Every field is independently optional: a miss on one never prevents
/// extraction of another. Records are built once by the assembler and only
/// read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice number/identifier.
    pub invoice_number: Option<String>,

    /// Date the invoice was issued.
    pub invoice_date: Option<NaiveDate>,

    /// Total amount due.
    pub total_amount: Option<Decimal>,

    /// Supplier name as printed on the invoice.
    pub supplier: Option<String>,

    /// Tax rate in whole percent.
    pub tax_rate: Option<i32>,
}

impl InvoiceRecord {
    /// Check if no field could be extracted at all.
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none()
            && self.invoice_date.is_none()
            && self.total_amount.is_none()
            && self.supplier.is_none()
            && self.tax_rate.is_none()
    }

    /// Names of the fields that were not extracted, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.invoice_number.is_none() {
            missing.push("invoice_number");
        }
        if self.invoice_date.is_none() {
            missing.push("invoice_date");
        }
        if self.total_amount.is_none() {
            missing.push("total_amount");
        }
        if self.supplier.is_none() {
            missing.push("supplier");
        }
        if self.tax_rate.is_none() {
            missing.push("tax_rate");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields() {
        let record = InvoiceRecord {
            invoice_number: Some("INV-1".to_string()),
            tax_rate: Some(19),
            ..Default::default()
        };
        assert_eq!(
            record.missing_fields(),
            vec!["invoice_date", "total_amount", "supplier"]
        );
        assert!(!record.is_empty());
        assert!(InvoiceRecord::default().is_empty());
    }

    #[test]
    fn test_serializes_absent_fields_as_null() {
        let record = InvoiceRecord {
            invoice_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["invoice_date"], "2025-06-01");
        assert!(json["invoice_number"].is_null());
        assert!(json["tax_rate"].is_null());
    }
}
