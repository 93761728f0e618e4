//! Path management for pocket-ledger
//!
//! Resolves where the ledger keeps its settings, storage files, backups and
//! exports.
//!
//! ## Path Resolution Order
//!
//! 1. `POCKET_LEDGER_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (e.g. `~/.config/pocket-ledger`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "POCKET_LEDGER_DATA_DIR";

/// Manages all paths used by pocket-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Base directory for all pocket-ledger data
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Create a new LedgerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform configuration directory can be determined
    /// and the override variable is not set.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding the two storage files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("database")
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the export directory
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the transaction records file
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.csv")
    }

    /// Get the path to the budget limits file
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.csv")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        for dir in [
            self.base_dir.clone(),
            self.data_dir(),
            self.backup_dir(),
            self.export_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                LedgerError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    ProjectDirs::from("", "", "pocket-ledger")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            LedgerError::Config(format!(
                "Could not determine a configuration directory; set {}",
                DATA_DIR_ENV
            ))
        })
}
