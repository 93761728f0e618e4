//! Assistant CLI commands
//!
//! The daily check and the monthly alerts plus recommendations.

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_alerts, format_recommendations};
use crate::error::LedgerResult;
use crate::reports::{alerts_for_month, recommendations_for_month, DailyCheck};
use crate::services::parse_date;
use crate::storage::Storage;

use super::transaction::month_or_current;

/// Assistant subcommands
#[derive(Subcommand)]
pub enum AssistantCommands {
    /// Today's spending against the daily guideline
    Check {
        /// Day to check (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Alerts and recommendations for a month
    Recommend {
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an assistant command
pub fn handle_assistant_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AssistantCommands,
) -> LedgerResult<()> {
    match cmd {
        AssistantCommands::Check { date } => {
            let date = match date.as_deref() {
                Some(d) => parse_date(d)?,
                None => Local::now().date_naive(),
            };
            print!(
                "{}",
                DailyCheck::generate(storage, date).format_terminal(&settings.currency_symbol)
            );
        }

        AssistantCommands::Recommend { month } => {
            let month = month_or_current(month.as_deref())?;
            print!("{}", format_alerts(&alerts_for_month(storage, month)));
            println!();
            print!(
                "{}",
                format_recommendations(&recommendations_for_month(storage, month))
            );
        }
    }

    Ok(())
}
