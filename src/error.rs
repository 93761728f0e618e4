//! Custom error types for pocket-ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Only input validation and genuine write failures surface as errors. Corrupt
//! or missing storage on the read path is absorbed by the stores and turned
//! into empty data plus a logged diagnostic.

use thiserror::Error;

/// The main error type for pocket-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage write errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backup errors
    #[error("Backup error: {0}")]
    Backup(String),
}

impl LedgerError {
    /// Create a validation error for an unknown category
    pub fn unknown_category(kind: impl std::fmt::Display, category: &str) -> Self {
        Self::Validation(format!("'{}' is not a known {} category", category, kind))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for pocket-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
