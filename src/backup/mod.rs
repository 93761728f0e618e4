//! Backup system for pocket-ledger
//!
//! Backups are JSON archives under `backups/`:
//! - `schema_version`: archive format version
//! - `created_at`: when the backup was taken
//! - `transactions_csv`: raw transaction file
//! - `budgets_csv`: raw budget file
//!
//! Only the newest `keep_last` archives (10 by default) are kept.

mod manager;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
