use anyhow::Result;
use clap::{Parser, Subcommand};

use pocket_ledger::cli::{
    handle_add_command, handle_analyze_command, handle_assistant_command, handle_balance_command,
    handle_budget_command, handle_data_command, handle_history_command, handle_list_command,
    AddArgs, AnalyzeCommands, AssistantCommands, BudgetCommands, DataCommands, ListArgs,
};
use pocket_ledger::config::{LedgerPaths, Settings};
use pocket_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocket",
    version,
    about = "Terminal personal finance ledger",
    long_about = "pocket records income and expenses in a local CSV ledger, tracks \
                  monthly category budgets and reports savings, alerts and a \
                  financial health score."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record an income or expense
    Add(AddArgs),

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show income, expenses and savings for a month
    Balance {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Spending, income, savings and health analysis
    #[command(subcommand)]
    Analyze(AnalyzeCommands),

    /// Daily check and recommendations
    #[command(subcommand)]
    Assistant(AssistantCommands),

    /// Export, import and backup
    #[command(subcommand)]
    Data(DataCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    pocket_ledger::init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&storage, &settings, args)?,
        Some(Commands::List(args)) => handle_list_command(&storage, &settings, args)?,
        Some(Commands::Balance { month }) => handle_balance_command(&storage, &settings, month)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Analyze(cmd)) => handle_analyze_command(&storage, &settings, cmd)?,
        Some(Commands::Assistant(cmd)) => handle_assistant_command(&storage, &settings, cmd)?,
        Some(Commands::Data(cmd)) => handle_data_command(&storage, &settings, cmd)?,
        Some(Commands::History { count }) => handle_history_command(&storage, count)?,
        Some(Commands::Config) => {
            // Write defaults so the file exists to be edited
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("pocket-ledger Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Backups kept:       {}", settings.backup_retention.keep_last);
            println!(
                "  Expense categories: {}",
                settings.categories.expense.join(", ")
            );
            println!(
                "  Income categories:  {}",
                settings.categories.income.join(", ")
            );
        }
        None => {
            println!("pocket - terminal personal finance ledger");
            println!();
            println!("Run 'pocket --help' for usage information.");
        }
    }

    Ok(())
}
