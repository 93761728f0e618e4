//! Audit logging for pocket-ledger
//!
//! Every transaction append and budget change is recorded in an append-only
//! audit log next to the ledger data.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single entry with timestamp, operation, record type and
//!   the record's before/after values.
//! - `AuditLogger`: writes entries to the log file using line-delimited JSON
//!   (JSONL) and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::transaction_appended(&txn))?;
//! logger.log(&AuditEntry::budget_set("Food", None, limit))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
