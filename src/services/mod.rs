//! Service layer for pocket-ledger
//!
//! The service layer sits on top of the storage layer and owns entry-time
//! validation against the category catalog, plus CSV import.

pub mod budget;
pub mod import;
pub mod transaction;

pub use budget::BudgetService;
pub use import::{ImportPreview, ImportPreviewEntry, ImportResult, ImportService, ImportStatus};
pub use transaction::{
    parse_amount, parse_date, parse_month, NewTransaction, TransactionFilter, TransactionService,
};
