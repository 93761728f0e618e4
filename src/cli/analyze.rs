//! Analysis CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::reports::{HealthScore, IncomeAnalysis, SavingsTrend, SpendingAnalysis};
use crate::storage::Storage;

use super::transaction::month_or_current;

/// Analysis subcommands
#[derive(Subcommand)]
pub enum AnalyzeCommands {
    /// Spending by category and daily burn rate
    Spending {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Income by source
    Income {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Savings over recent months
    Savings {
        /// Last month of the trend (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Number of months to show (1 to 120)
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..=120))]
        months: u32,
    },

    /// Financial health score
    Health {
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an analysis command
pub fn handle_analyze_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AnalyzeCommands,
) -> LedgerResult<()> {
    let currency = &settings.currency_symbol;

    let output = match cmd {
        AnalyzeCommands::Spending { month } => {
            let month = month_or_current(month.as_deref())?;
            SpendingAnalysis::generate(storage, month).format_terminal(currency)
        }
        AnalyzeCommands::Income { month } => {
            let month = month_or_current(month.as_deref())?;
            IncomeAnalysis::generate(storage, month).format_terminal(currency)
        }
        AnalyzeCommands::Savings { month, months } => {
            let end = month_or_current(month.as_deref())?;
            SavingsTrend::generate(storage, end, months).format_terminal(currency)
        }
        AnalyzeCommands::Health { month } => {
            let month = month_or_current(month.as_deref())?;
            HealthScore::generate(storage, month).format_terminal()
        }
    };

    print!("{}", output);
    Ok(())
}
