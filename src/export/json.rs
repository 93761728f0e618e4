//! JSON export of transactions
//!
//! A pretty-printed array of records using the storage field names.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

/// Write transactions as a JSON array
pub fn export_transactions_json<W: Write>(
    transactions: &[Transaction],
    mut writer: W,
) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut writer, transactions)
        .map_err(|e| LedgerError::Export(format!("Failed to serialize transactions: {}", e)))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
