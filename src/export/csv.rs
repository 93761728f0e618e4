//! CSV export of transactions
//!
//! Same columns as the transaction store, so an export can be imported back.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::storage::RECORD_HEADER;

/// Write transactions as CSV with a header row
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(RECORD_HEADER)?;
    for txn in transactions {
        csv_writer.write_record([
            txn.date_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            txn.description.clone(),
            txn.amount.minor().to_string(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
