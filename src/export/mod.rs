//! Export module for pocket-ledger
//!
//! Writes every stored transaction to a timestamped file under `exports/`:
//! - CSV: same columns as the transaction store, importable again
//! - JSON: array of records using the storage field names

pub mod csv;
pub mod json;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

pub use self::csv::export_transactions_csv;
pub use self::json::export_transactions_json;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Where an export went and how many records it holds
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub count: usize,
}

/// Export all transactions into the export directory
///
/// Returns `None` when the store holds no transactions; no file is written.
pub fn export_all(storage: &Storage, format: ExportFormat) -> LedgerResult<Option<ExportSummary>> {
    let transactions = storage.records.scan_all();
    if transactions.is_empty() {
        return Ok(None);
    }

    let export_dir = storage.paths().export_dir();
    std::fs::create_dir_all(&export_dir).map_err(|e| {
        LedgerError::Export(format!(
            "Failed to create {}: {}",
            export_dir.display(),
            e
        ))
    })?;

    let filename = format!(
        "transactions_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    let path = export_dir.join(filename);

    let file = File::create(&path).map_err(|e| {
        LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let writer = BufWriter::new(file);

    match format {
        ExportFormat::Csv => export_transactions_csv(&transactions, writer)?,
        ExportFormat::Json => export_transactions_json(&transactions, writer)?,
    }

    info!(path = %path.display(), count = transactions.len(), "exported transactions");

    Ok(Some(ExportSummary {
        path,
        count: transactions.len(),
    }))
}
