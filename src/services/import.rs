//! CSV Import service
//!
//! Imports transactions from a CSV file with the storage columns. Rows are
//! validated one by one, and rows already present in the ledger (or earlier
//! in the same file) are skipped as duplicates.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::info;

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_iso_date, Money, Transaction, TransactionKind};
use crate::storage::{Storage, RECORD_HEADER};

/// Outcome of parsing one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    New,
    Duplicate,
    Error(String),
}

/// One row of an import preview
#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    /// 1-based line number in the source file
    pub line: u64,
    pub transaction: Option<Transaction>,
    pub status: ImportStatus,
}

/// Parsed file, ready to be confirmed
#[derive(Debug, Clone, Default)]
pub struct ImportPreview {
    pub entries: Vec<ImportPreviewEntry>,
}

impl ImportPreview {
    /// Transactions that would be appended
    pub fn new_transactions(&self) -> Vec<Transaction> {
        self.entries
            .iter()
            .filter(|e| e.status == ImportStatus::New)
            .filter_map(|e| e.transaction.clone())
            .collect()
    }

    pub fn new_count(&self) -> usize {
        self.count(|s| *s == ImportStatus::New)
    }

    pub fn duplicate_count(&self) -> usize {
        self.count(|s| *s == ImportStatus::Duplicate)
    }

    pub fn error_count(&self) -> usize {
        self.count(|s| matches!(s, ImportStatus::Error(_)))
    }

    fn count(&self, predicate: impl Fn(&ImportStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| predicate(&e.status)).count()
    }
}

/// Result of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub errors: usize,
}

/// Service for importing transactions
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse a CSV file into a preview
    pub fn preview_file(&self, path: &Path) -> LedgerResult<ImportPreview> {
        let file = File::open(path).map_err(|e| {
            LedgerError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.preview_reader(file)
    }

    /// Parse CSV data into a preview, marking duplicates against the ledger
    pub fn preview_reader<R: Read>(&self, reader: R) -> LedgerResult<ImportPreview> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| LedgerError::Import(format!("Cannot read header: {}", e)))?
            .clone();

        let missing: Vec<&str> = RECORD_HEADER
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h.trim() == *column))
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::Import(format!(
                "Invalid CSV format, missing columns: {}. Expected header: {}",
                missing.join(", "),
                RECORD_HEADER.join(",")
            )));
        }

        let mut seen: HashSet<String> = self
            .storage
            .records
            .scan_all()
            .iter()
            .map(Transaction::identity_key)
            .collect();

        let mut preview = ImportPreview::default();
        for result in csv_reader.records() {
            let record = result.map_err(|e| LedgerError::Import(e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let entry = match parse_row(&headers, &record) {
                Ok(txn) => {
                    let status = if seen.insert(txn.identity_key()) {
                        ImportStatus::New
                    } else {
                        ImportStatus::Duplicate
                    };
                    ImportPreviewEntry {
                        line,
                        transaction: Some(txn),
                        status,
                    }
                }
                Err(reason) => ImportPreviewEntry {
                    line,
                    transaction: None,
                    status: ImportStatus::Error(reason),
                },
            };
            preview.entries.push(entry);
        }

        Ok(preview)
    }

    /// Append the new transactions of a preview
    pub fn import_from_preview(&self, preview: &ImportPreview) -> LedgerResult<ImportResult> {
        let transactions = preview.new_transactions();
        self.storage.records.append_all(&transactions)?;

        let entries: Vec<AuditEntry> = transactions
            .iter()
            .map(AuditEntry::transaction_imported)
            .collect();
        self.storage.log_audit(&entries);

        info!(count = transactions.len(), "imported transactions");

        Ok(ImportResult {
            imported: transactions.len(),
            duplicates_skipped: preview.duplicate_count(),
            errors: preview.error_count(),
        })
    }
}

fn field<'r>(headers: &StringRecord, record: &'r StringRecord, name: &str) -> &'r str {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .and_then(|i| record.get(i))
        .unwrap_or_default()
}

fn parse_row(headers: &StringRecord, record: &StringRecord) -> Result<Transaction, String> {
    let date_text = field(headers, record, "date").trim();
    let date = parse_iso_date(date_text).ok_or_else(|| format!("invalid date '{}'", date_text))?;

    let kind: TransactionKind = field(headers, record, "type")
        .parse()
        .map_err(|e| format!("{}", e))?;

    let amount_text = field(headers, record, "amount_minor").trim();
    let amount: i64 = amount_text
        .parse()
        .map_err(|_| format!("invalid amount '{}'", amount_text))?;

    let txn = Transaction::new(
        date,
        kind,
        field(headers, record, "category").trim(),
        field(headers, record, "description"),
        Money::from_minor(amount),
    );
    txn.validate().map_err(|e| e.to_string())?;

    Ok(txn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerPaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    const SAMPLE: &str = "date,type,category,description,amount_minor\n\
2024-03-01,expense,Food,Lunch,1500\n\
2024-03-02,income,Salary,Pay,250000\n\
2024-03-01,expense,Food,Lunch,1500\n\
2024-03-03,expense,Food,Bad,abc\n\
2024-03-04,refund,Food,Bad type,100\n\
2024-03-05,expense,Food,Zero,0\n\
03/06/2024,expense,Food,Bad date,100\n";

    #[test]
    fn test_preview_classifies_rows() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let preview = service.preview_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(preview.entries.len(), 7);
        assert_eq!(preview.new_count(), 2);
        assert_eq!(preview.duplicate_count(), 1);
        assert_eq!(preview.error_count(), 4);
        assert_eq!(preview.entries[2].line, 4);
    }

    #[test]
    fn test_existing_records_are_duplicates() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .records
            .append(&Transaction::new(
                NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                TransactionKind::Income,
                "Salary",
                "Pay",
                Money::from_minor(250_000),
            ))
            .unwrap();
        let service = ImportService::new(&storage);

        let preview = service.preview_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(preview.new_count(), 1);
        assert_eq!(preview.duplicate_count(), 2);
    }

    #[test]
    fn test_import_appends_new_rows() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let preview = service.preview_reader(SAMPLE.as_bytes()).unwrap();
        let result = service.import_from_preview(&preview).unwrap();

        assert_eq!(
            result,
            ImportResult {
                imported: 2,
                duplicates_skipped: 1,
                errors: 4,
            }
        );
        assert_eq!(storage.records.count(), 2);
        assert_eq!(storage.audit().read_all().unwrap().len(), 2);

        // Importing the same file again adds nothing
        let again = service.preview_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(again.new_count(), 0);
    }

    #[test]
    fn test_non_canonical_rows_are_errors() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let preview = service
            .preview_reader(
                "date,type,category,description,amount_minor\n\
2024-3-5,expense,Food,Unpadded,700\n\
2024-03-06,expense,Food,Huge,9223372036854775807\n\
2024-03-07,expense,Food,Fine,100\n"
                    .as_bytes(),
            )
            .unwrap();

        assert_eq!(preview.new_count(), 1);
        assert_eq!(preview.error_count(), 2);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let err = service
            .preview_reader("date,type,category,amount_paisa\n2024-03-01,expense,Food,100\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
    }
}
