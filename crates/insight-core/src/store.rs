//! Append-only SQLite store for processed invoices.
//!
//! One row per processed document. Rows are never updated or deleted.

use std::path::Path;
use std::sync::Mutex;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::invoice::InvoiceRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS invoices (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        filename TEXT NOT NULL,
        invoice_number TEXT,
        invoice_date TEXT,
        total_amount REAL,
        tax_rate REAL,
        supplier TEXT,
        raw_text TEXT
    );
";

/// A row to append.
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub filename: String,
    pub record: InvoiceRecord,
    pub raw_text: Option<String>,
}

/// A stored invoice row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredInvoice {
    pub id: i64,
    pub filename: String,
    #[serde(flatten)]
    pub record: InvoiceRecord,
    pub raw_text: Option<String>,
}

/// Listing entry for a stored invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceSummaryRow {
    pub id: i64,
    pub filename: String,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub total_amount: Option<Decimal>,
}

/// SQLite-backed invoice table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        info!("Opened invoice store at {}", path.display());
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Append a row and return its id.
    pub fn insert(&self, invoice: &NewInvoice) -> Result<i64> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let record = &invoice.record;
        conn.execute(
            "INSERT INTO invoices
             (filename, invoice_number, invoice_date, total_amount, tax_rate, supplier, raw_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                invoice.filename,
                record.invoice_number,
                record.invoice_date.map(|d| d.to_string()),
                record.total_amount.and_then(|a| a.to_f64()),
                record.tax_rate.map(f64::from),
                record.supplier,
                invoice.raw_text,
            ],
        )?;
        let id = conn.last_insert_rowid();
        debug!("Stored invoice {} as id {}", invoice.filename, id);
        Ok(id)
    }

    /// Fetch one row by id.
    pub fn get(&self, id: i64) -> Result<Option<StoredInvoice>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let row = conn
            .query_row(
                "SELECT id, filename, invoice_number, invoice_date, total_amount, tax_rate,
                        supplier, raw_text
                 FROM invoices WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Option<f64>>(4)?,
                        row.get::<_, Option<f64>>(5)?,
                        row.get::<_, Option<String>>(6)?,
                        row.get::<_, Option<String>>(7)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, filename, invoice_number, date, amount, tax_rate, supplier, raw_text)) = row
        else {
            return Ok(None);
        };

        Ok(Some(StoredInvoice {
            id,
            filename,
            record: InvoiceRecord {
                invoice_number,
                invoice_date: decode_date(date)?,
                total_amount: decode_amount(amount)?,
                supplier,
                tax_rate: decode_tax_rate(tax_rate)?,
            },
            raw_text,
        }))
    }

    /// List every row in insertion order.
    pub fn list(&self) -> Result<Vec<InvoiceSummaryRow>> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, filename, invoice_number, invoice_date, total_amount
             FROM invoices ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<f64>>(4)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, filename, invoice_number, date, amount)| {
                Ok(InvoiceSummaryRow {
                    id,
                    filename,
                    invoice_number,
                    invoice_date: decode_date(date)?,
                    total_amount: decode_amount(amount)?,
                })
            })
            .collect()
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM invoices", [], |r| r.get(0))?;
        Ok(count as u64)
    }
}

fn decode_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            s.parse::<NaiveDate>().map_err(|_| StoreError::Corrupt {
                column: "invoice_date",
                value: s,
            })
        })
        .transpose()
}

fn decode_amount(value: Option<f64>) -> Result<Option<Decimal>> {
    value
        .map(|v| {
            Decimal::from_f64(v).ok_or_else(|| StoreError::Corrupt {
                column: "total_amount",
                value: v.to_string(),
            })
        })
        .transpose()
}

fn decode_tax_rate(value: Option<f64>) -> Result<Option<i32>> {
    value
        .map(|v| {
            if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
                Ok(v as i32)
            } else {
                Err(StoreError::Corrupt {
                    column: "tax_rate",
                    value: v.to_string(),
                })
            }
        })
        .transpose()
}
