//! Backup manager for pocket-ledger
//!
//! Each backup is a single JSON archive holding the raw text of both storage
//! files. After a backup only the newest `keep_last` archives are kept.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::settings::BackupRetention;
use crate::config::LedgerPaths;
use crate::error::{LedgerError, LedgerResult};
use crate::storage::{read_optional, write_json_atomic};

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Backup archive format
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    /// Raw contents of the transaction file, absent if it didn't exist
    pub transactions_csv: Option<String>,
    /// Raw contents of the budget file, absent if it didn't exist
    pub budgets_csv: Option<String>,
}

/// Manages backup creation and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    paths: LedgerPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: LedgerPaths, retention: BackupRetention) -> Self {
        let backup_dir = paths.backup_dir();
        Self {
            backup_dir,
            paths,
            retention,
        }
    }

    /// Create a backup of both storage files
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> LedgerResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LedgerError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.json",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: 1,
            created_at: now,
            transactions_csv: read_optional(self.paths.transactions_file())?,
            budgets_csv: read_optional(self.paths.budgets_file())?,
        };

        write_json_atomic(&backup_path, &archive)
            .map_err(|e| LedgerError::Backup(format!("Failed to write backup: {}", e)))?;

        debug!(path = %backup_path.display(), "wrote backup archive");
        Ok(backup_path)
    }

    /// List all backups, newest first
    pub fn list_backups(&self) -> LedgerResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LedgerError::Backup(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LedgerError::Backup(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(backups)
    }

    /// Delete everything but the newest `keep_last` backups
    ///
    /// At least one backup is always kept, even with `keep_last = 0`.
    pub fn enforce_retention(&self) -> LedgerResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        let keep = self.retention.keep_last.max(1) as usize;

        for backup in self.list_backups()?.into_iter().skip(keep) {
            fs::remove_file(&backup.path).map_err(|e| {
                LedgerError::Backup(format!("Failed to delete old backup: {}", e))
            })?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            info!(count = deleted.len(), "removed old backups");
        }
        Ok(deleted)
    }

    /// Create a backup and then enforce the retention policy
    pub fn create_backup_with_retention(&self) -> LedgerResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS` or `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let (base, millis) = match stamp.len() {
        15 => (stamp, 0),
        19 => (&stamp[..15], stamp.get(16..)?.parse::<i64>().ok()?),
        _ => return None,
    };

    let naive = NaiveDateTime::parse_from_str(base, "%Y%m%d-%H%M%S").ok()?;
    Some(naive.and_utc() + chrono::Duration::milliseconds(millis))
}
