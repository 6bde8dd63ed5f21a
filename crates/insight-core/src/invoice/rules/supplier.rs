//! Supplier name extraction.

use super::FieldExtractor;
use super::patterns::SUPPLIER;

/// Supplier extractor. Keeps the rest of the labeled line.
pub struct SupplierExtractor;

impl SupplierExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SupplierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SupplierExtractor {
    type Output = String;

    fn field(&self) -> &'static str {
        "supplier"
    }

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = SUPPLIER.captures(text)?;
        let name = caps[1].lines().next().unwrap_or("").trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Extract the supplier name from invoice text.
pub fn extract_supplier(text: &str) -> Option<String> {
    SupplierExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_supplier() {
        assert_eq!(
            extract_supplier("Lieferant: Beispiel GmbH\nMwSt: 19%"),
            Some("Beispiel GmbH".to_string())
        );
        assert_eq!(
            extract_supplier("supplier ACME Corp.   \r\nTotal: 5"),
            Some("ACME Corp.".to_string())
        );
    }

    #[test]
    fn test_supplier_on_next_line() {
        assert_eq!(
            extract_supplier("Lieferant:\n  Muster AG\nStraße 1"),
            Some("Muster AG".to_string())
        );
    }

    #[test]
    fn test_blank_supplier_is_absent() {
        assert_eq!(extract_supplier("Supplier:   "), None);
        assert_eq!(extract_supplier("Rechnung"), None);
    }
}
