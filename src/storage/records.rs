//! Transaction record store
//!
//! Append-only CSV file with the columns
//! `date,type,category,description,amount_minor`. The header is written once
//! when the file is created and never rewritten. Reads are lenient: a bad row
//! is skipped with a warning and an unreadable file reads as empty.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_iso_date, Money, Transaction, TransactionKind};

use super::file_io::{ends_with_newline, is_missing_or_empty};

/// Column names, in storage order
pub const RECORD_HEADER: [&str; 5] = ["date", "type", "category", "description", "amount_minor"];

/// One raw row as found on disk
#[derive(Debug, Deserialize)]
struct RecordRow {
    date: String,
    #[serde(rename = "type")]
    kind: String,
    category: String,
    #[serde(default)]
    description: String,
    amount_minor: String,
}

impl RecordRow {
    fn into_transaction(self) -> Result<Transaction, String> {
        let date =
            parse_iso_date(&self.date).ok_or_else(|| format!("invalid date '{}'", self.date))?;
        let kind: TransactionKind = self.kind.parse().map_err(|e| format!("{}", e))?;
        let amount: i64 = self
            .amount_minor
            .trim()
            .parse()
            .map_err(|_| format!("invalid amount '{}'", self.amount_minor))?;
        if amount <= 0 {
            return Err(format!("non-positive amount {}", amount));
        }
        if amount > Money::MAX_AMOUNT.minor() {
            return Err(format!("amount {} exceeds the maximum", amount));
        }
        if self.category.trim().is_empty() {
            return Err("missing category".to_string());
        }

        Ok(Transaction::new(
            date,
            kind,
            self.category,
            self.description,
            Money::from_minor(amount),
        ))
    }
}

/// Durable append-only store of transaction records
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a record store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one transaction at the end of the file
    pub fn append(&self, txn: &Transaction) -> LedgerResult<()> {
        self.append_all(std::slice::from_ref(txn))
    }

    /// Append several transactions in order with a single open of the file
    pub fn append_all(&self, txns: &[Transaction]) -> LedgerResult<()> {
        if txns.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let needs_header = is_missing_or_empty(&self.path);
        let needs_line_break = !ends_with_newline(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                LedgerError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        if needs_line_break {
            file.write_all(b"\n")
                .map_err(|e| LedgerError::Storage(format!("Failed to write record: {}", e)))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(RECORD_HEADER)?;
        }

        for txn in txns {
            writer.write_record([
                txn.date_string(),
                txn.kind.as_str().to_string(),
                txn.category.clone(),
                txn.description.clone(),
                txn.amount.minor().to_string(),
            ])?;
        }

        writer
            .flush()
            .map_err(|e| LedgerError::Storage(format!("Failed to flush records: {}", e)))?;

        debug!(count = txns.len(), path = %self.path.display(), "appended transaction records");
        Ok(())
    }

    /// Read every readable record, oldest first
    ///
    /// Never fails: a missing file is an empty ledger, a malformed row is
    /// skipped, and a file that can't be read at all yields no records.
    pub fn scan_all(&self) -> Vec<Transaction> {
        if !self.path.exists() {
            return Vec::new();
        }

        let mut reader = match csv::ReaderBuilder::new().from_path(&self.path) {
            Ok(reader) => reader,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "transaction file unreadable, treating as empty");
                return Vec::new();
            }
        };

        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "transaction header unreadable, treating as empty");
                return Vec::new();
            }
        };

        if headers.is_empty() {
            return Vec::new();
        }

        let missing: Vec<&str> = RECORD_HEADER
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h.trim() == *column))
            .collect();
        if !missing.is_empty() {
            warn!(
                path = %self.path.display(),
                missing = ?missing,
                "transaction header is missing columns, treating as empty"
            );
            return Vec::new();
        }

        let mut transactions = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    warn!(path = %self.path.display(), error = %e, "stopped reading transaction file");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "skipping corrupted transaction record");
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let parsed = record
                .deserialize::<RecordRow>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(RecordRow::into_transaction);

            match parsed {
                Ok(txn) => transactions.push(txn),
                Err(reason) => {
                    warn!(line, reason = %reason, "skipping corrupted transaction record");
                }
            }
        }

        transactions
    }

    /// Number of readable records
    pub fn count(&self) -> usize {
        self.scan_all().len()
    }
}
