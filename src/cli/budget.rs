//! Budget CLI commands
//!
//! Setting monthly category limits and showing how the month tracks them.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_limits;
use crate::error::LedgerResult;
use crate::reports::UtilizationReport;
use crate::services::{parse_amount, BudgetService};
use crate::storage::Storage;

use super::transaction::month_or_current;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit for an expense category
    Set {
        /// Category name
        category: String,
        /// Limit in major units (e.g. "300" or "300.00")
        amount: String,
    },

    /// Show limits and this month's utilization
    Show {
        /// Month to report on (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let service = BudgetService::new(storage, &settings.categories);
    let currency = &settings.currency_symbol;

    match cmd {
        BudgetCommands::Set { category, amount } => {
            let limit = parse_amount(&amount)?;
            let (name, previous) = service.set_budget(&category, limit)?;

            match previous {
                Some(old) => println!(
                    "Budget for '{}' changed from {} to {}",
                    name,
                    old.format_with_symbol(currency),
                    limit.format_with_symbol(currency)
                ),
                None => println!(
                    "Budget for '{}' set to {}",
                    name,
                    limit.format_with_symbol(currency)
                ),
            }
        }

        BudgetCommands::Show { month } => {
            let month = month_or_current(month.as_deref())?;
            let budgets = service.get_budget_map();

            print!("{}", format_budget_limits(&budgets, currency));
            if !budgets.is_empty() {
                println!();
                print!("{}", UtilizationReport::generate(storage, month).format_terminal(currency));
            }
        }
    }

    Ok(())
}
