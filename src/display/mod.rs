//! Display formatting for terminal output
//!
//! Reports carry their own `format_terminal`; this module covers the
//! listings and short messages the CLI prints.

pub mod report;
pub mod transaction;

pub use report::{format_alerts, format_audit_history, format_budget_limits, format_recommendations};
pub use transaction::{format_recorded, format_transaction_table};
