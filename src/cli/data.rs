//! Data management CLI commands
//!
//! Export, CSV import and backups.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_all, ExportFormat};
use crate::services::{ImportService, ImportStatus};
use crate::storage::Storage;

/// Data subcommands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Export all transactions as CSV into the exports directory
    ExportCsv,

    /// Export all transactions as JSON into the exports directory
    ExportJson,

    /// Import transactions from a CSV file with the storage columns
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// Import without stopping at the preview
        #[arg(short, long)]
        yes: bool,
    },

    /// Back up the storage files
    Backup,
}

/// Handle a data command
pub fn handle_data_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DataCommands,
) -> LedgerResult<()> {
    match cmd {
        DataCommands::ExportCsv => handle_export(storage, ExportFormat::Csv),
        DataCommands::ExportJson => handle_export(storage, ExportFormat::Json),
        DataCommands::Import { file, yes } => handle_import(storage, &file, yes),
        DataCommands::Backup => handle_backup(storage, settings),
    }
}

fn handle_export(storage: &Storage, format: ExportFormat) -> LedgerResult<()> {
    match export_all(storage, format)? {
        Some(summary) => println!(
            "Exported {} transaction(s) to: {}",
            summary.count,
            summary.path.display()
        ),
        None => println!("No transactions to export."),
    }
    Ok(())
}

fn handle_import(storage: &Storage, file: &Path, yes: bool) -> LedgerResult<()> {
    if !file.exists() {
        return Err(LedgerError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let service = ImportService::new(storage);
    let preview = service.preview_file(file)?;

    if preview.entries.is_empty() {
        println!("No transactions found in CSV file.");
        return Ok(());
    }

    println!("Import Preview for {}", file.display());
    println!("{}", "=".repeat(40));
    println!("  New transactions:   {}", preview.new_count());
    println!("  Duplicates (skip):  {}", preview.duplicate_count());
    println!("  Errors:             {}", preview.error_count());

    for entry in &preview.entries {
        if let ImportStatus::Error(reason) = &entry.status {
            println!("    Line {}: {}", entry.line, reason);
        }
    }
    println!();

    if preview.new_count() == 0 {
        println!("No new transactions to import.");
        return Ok(());
    }

    if !yes {
        println!("Nothing imported. Re-run with --yes to import.");
        return Ok(());
    }

    let result = service.import_from_preview(&preview)?;
    println!("Import Complete!");
    println!("  Imported:    {}", result.imported);
    println!("  Skipped:     {}", result.duplicates_skipped);
    println!("  Errors:      {}", result.errors);

    Ok(())
}

fn handle_backup(storage: &Storage, settings: &Settings) -> LedgerResult<()> {
    let manager = BackupManager::new(
        storage.paths().clone(),
        settings.backup_retention.clone(),
    );

    let (backup_path, deleted) = manager.create_backup_with_retention()?;
    println!("Backup created: {}", backup_path.display());
    if !deleted.is_empty() {
        println!("Removed {} old backup(s)", deleted.len());
    }

    Ok(())
}
