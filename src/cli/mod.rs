//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analyze;
pub mod assistant;
pub mod budget;
pub mod data;
pub mod history;
pub mod transaction;

pub use analyze::{handle_analyze_command, AnalyzeCommands};
pub use assistant::{handle_assistant_command, AssistantCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use data::{handle_data_command, DataCommands};
pub use history::handle_history_command;
pub use transaction::{
    handle_add_command, handle_balance_command, handle_list_command, AddArgs, ListArgs,
};
