//! Configuration module for pocket-ledger
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (currency symbol, category lists, backup retention)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
