//! pocket-ledger - terminal personal finance ledger
//!
//! This library provides the core functionality for the `pocket` command-line
//! ledger. Income and expense transactions are appended to a CSV file,
//! monthly category limits live in a second CSV file, and every report is
//! computed on demand from a fresh scan of both.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, transactions, month keys and the category catalog
//! - `storage`: CSV record and budget stores
//! - `services`: Entry-time validation, listings and CSV import
//! - `reports`: Monthly aggregation and the metrics built on it
//! - `audit`: Audit logging system
//! - `backup`: Backup archives with retention
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `pocket` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_ledger::config::{LedgerPaths, Settings};
//! use pocket_ledger::reports::HealthScore;
//! use pocket_ledger::models::MonthKey;
//! use pocket_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! println!("{}", HealthScore::generate(&storage, MonthKey::current()).format_terminal());
//! ```

use std::sync::Once;

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "POCKET_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber once per process
///
/// The filter comes from `POCKET_LOG`, then `RUST_LOG`, and defaults to
/// warnings from this crate only.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("pocket_ledger=warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
