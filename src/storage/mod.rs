//! Storage layer for pocket-ledger
//!
//! Two CSV files under the data directory: an append-only transaction log and
//! a small budget table that is rewritten in full. The `Storage` coordinator
//! owns both stores and the audit logger.

pub mod budgets;
pub mod file_io;
pub mod records;

pub use budgets::{BudgetMap, BudgetStore};
pub use file_io::{read_optional, write_bytes_atomic, write_json_atomic};
pub use records::{RecordStore, RECORD_HEADER};

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::LedgerPaths;
use crate::error::LedgerResult;

/// Main storage coordinator that provides access to both stores
pub struct Storage {
    paths: LedgerPaths,
    pub records: RecordStore,
    pub budgets: BudgetStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            records: RecordStore::new(paths.transactions_file()),
            budgets: BudgetStore::new(paths.budgets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record changes in the audit trail
    ///
    /// The store write has already succeeded at this point, so a failing audit
    /// log is reported and otherwise ignored.
    pub fn log_audit(&self, entries: &[AuditEntry]) {
        if let Err(e) = self.audit.log_batch(entries) {
            warn!(error = %e, count = entries.len(), "failed to write audit log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use crate::models::{Money, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("database").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(storage.records.scan_all().is_empty());
        assert!(storage.budgets.read_all().is_empty());
    }

    #[test]
    fn test_log_audit_writes_entries() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            TransactionKind::Expense,
            "Food",
            "Lunch",
            Money::from_minor(1500),
        );
        storage.log_audit(&[
            AuditEntry::transaction_appended(&txn),
            AuditEntry::budget_set("Food", Some(Money::from_minor(100)), Money::from_minor(200)),
        ]);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_type, EntityType::Transaction);
        assert_eq!(entries[1].entity_id, "Food");
    }

    #[test]
    fn test_audit_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        // A directory where the log file should be makes every audit write fail
        std::fs::create_dir_all(storage.audit().path()).unwrap();
        storage.log_audit(&[AuditEntry::budget_set("Food", None, Money::from_minor(1))]);
    }
}
