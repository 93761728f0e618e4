//! Audit history CLI command

use crate::display::format_audit_history;
use crate::error::LedgerResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_history_command(storage: &Storage, count: usize) -> LedgerResult<()> {
    let entries = storage.audit().read_recent(count)?;
    print!("{}", format_audit_history(&entries));
    Ok(())
}
