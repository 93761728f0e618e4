//! Core data models for pocket-ledger
//!
//! This module contains the data structures of the ledger domain:
//! transactions, amounts, month keys and the category catalog.

pub mod category;
pub mod money;
pub mod month;
pub mod transaction;

pub use category::CategoryCatalog;
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthKeyParseError};
pub use transaction::{parse_iso_date, Transaction, TransactionKind, TransactionValidationError};
