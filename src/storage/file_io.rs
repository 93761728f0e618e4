//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::LedgerError;

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<(), LedgerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(data)
        .map_err(|e| LedgerError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Write JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), LedgerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| LedgerError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_bytes_atomic(path, &bytes)
}

/// Read a file to a string, returning `None` if it doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<String>, LedgerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Check whether a file is missing or has no content
pub fn is_missing_or_empty<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

/// Check whether a non-empty file ends with a line break
pub fn ends_with_newline<P: AsRef<Path>>(path: P) -> Result<bool, LedgerError> {
    let path = path.as_ref();
    if is_missing_or_empty(path) {
        return Ok(true);
    }

    let mut file = File::open(path)
        .map_err(|e| LedgerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .and_then(|_| file.read_exact(&mut last))
        .map_err(|e| LedgerError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.csv");

        assert_eq!(read_optional(&path).unwrap(), None);
        assert!(is_missing_or_empty(&path));
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budgets.csv");

        write_bytes_atomic(&path, b"Food,10000\n").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("Food,10000\n"));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
        let loaded: TestData = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.csv");

        write_bytes_atomic(&path, b"").unwrap();
        assert!(path.exists());
        assert!(is_missing_or_empty(&path));
    }

    #[test]
    fn test_ends_with_newline() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lines.csv");

        assert!(ends_with_newline(&path).unwrap());
        fs::write(&path, "a,b\n").unwrap();
        assert!(ends_with_newline(&path).unwrap());
        fs::write(&path, "a,b").unwrap();
        assert!(!ends_with_newline(&path).unwrap());
    }
}
