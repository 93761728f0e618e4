//! Budget limit store
//!
//! Headerless two-column CSV (`category,limit_minor`), one row per category,
//! rewritten in full on every change.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

use super::file_io::write_bytes_atomic;

/// Category name to monthly limit
pub type BudgetMap = BTreeMap<String, Money>;

/// Durable mapping of category to monthly budget limit
pub struct BudgetStore {
    path: PathBuf,
}

impl BudgetStore {
    /// Create a budget store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read every budget limit
    ///
    /// A missing or unreadable file is an empty mapping. Rows that don't hold
    /// a category and a positive integer limit are skipped; when a category
    /// appears twice the later row wins.
    pub fn read_all(&self) -> BudgetMap {
        let mut budgets = BudgetMap::new();

        if !self.path.exists() {
            return budgets;
        }

        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
        {
            Ok(reader) => reader,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "budget file unreadable, treating as empty");
                return budgets;
            }
        };

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    warn!(path = %self.path.display(), error = %e, "budget file unreadable, treating as empty");
                    return BudgetMap::new();
                }
                Err(e) => {
                    warn!(error = %e, "skipping corrupted budget row");
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let category = record.get(0).map(str::trim).unwrap_or_default();
            let limit = record.get(1).map(str::trim).unwrap_or_default();

            if category.is_empty() && limit.is_empty() {
                continue;
            }
            if category.is_empty() {
                warn!(line, "skipping budget row without a category");
                continue;
            }

            match limit.parse::<i64>() {
                Ok(minor) if minor > 0 && minor <= Money::MAX_AMOUNT.minor() => {
                    budgets.insert(category.to_string(), Money::from_minor(minor));
                }
                _ => {
                    warn!(line, category, limit, "skipping budget row with an invalid limit");
                }
            }
        }

        budgets
    }

    /// Replace every persisted budget with `budgets`
    pub fn write_all(&self, budgets: &BudgetMap) -> LedgerResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        for (category, limit) in budgets {
            let limit = limit.minor().to_string();
            writer.write_record([category.as_str(), limit.as_str()])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| LedgerError::Storage(format!("Failed to encode budgets: {}", e)))?;
        write_bytes_atomic(&self.path, &bytes)?;

        debug!(count = budgets.len(), path = %self.path.display(), "rewrote budget file");
        Ok(())
    }
}
