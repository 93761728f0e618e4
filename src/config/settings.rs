//! User settings for pocket-ledger
//!
//! Manages user preferences: the currency symbol used for display, the
//! income/expense category lists offered at entry time, and the backup
//! retention policy.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::CategoryCatalog;

/// Backup retention settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of most recent backups to keep
    pub keep_last: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { keep_last: 10 }
    }
}

/// User settings for pocket-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Categories accepted when entering transactions and budgets
    #[serde(default)]
    pub categories: CategoryCatalog,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            categories: CategoryCatalog::default(),
            backup_retention: BackupRetention::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LedgerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LedgerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            LedgerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
