//! Transaction CLI commands
//!
//! Recording income and expenses, filtered listings and the monthly balance.

use chrono::Local;
use clap::{Args, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_recorded, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{MonthKey, TransactionKind};
use crate::reports::MonthlySummary;
use crate::services::{
    parse_amount, parse_date, parse_month, NewTransaction, TransactionFilter, TransactionService,
};
use crate::storage::Storage;

/// Kind argument for `add`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Arguments for recording a transaction
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Income or expense
    #[arg(value_enum)]
    pub kind: KindArg,
    /// Amount in major units (e.g. "12.50")
    pub amount: String,
    /// Category name
    #[arg(short, long)]
    pub category: String,
    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Listing filters
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    /// Last 7 days, or `--days N`
    Last7,
    /// One month, `--month` or the current one
    Month,
    Income,
    Expense,
}

/// Arguments for listing transactions
#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(short, long, value_enum, default_value = "all")]
    pub filter: FilterArg,
    /// Window size for the `last7` filter
    #[arg(long)]
    pub days: Option<u32>,
    /// Month for the `month` filter (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
}

/// Parse an optional month argument, defaulting to the current month
pub fn month_or_current(month: Option<&str>) -> LedgerResult<MonthKey> {
    match month {
        Some(m) => parse_month(m),
        None => Ok(MonthKey::current()),
    }
}

/// Handle `add`
pub fn handle_add_command(storage: &Storage, settings: &Settings, args: AddArgs) -> LedgerResult<()> {
    let amount = parse_amount(&args.amount)?;
    let date = match args.date.as_deref() {
        Some(d) => parse_date(d)?,
        None => Local::now().date_naive(),
    };

    let service = TransactionService::new(storage, &settings.categories);
    let txn = service.append_transaction(NewTransaction {
        kind: args.kind.into(),
        date,
        category: args.category,
        description: args.description,
        amount,
    })?;

    println!("{}", format_recorded(&txn, &settings.currency_symbol));
    Ok(())
}

/// Handle `list`
pub fn handle_list_command(storage: &Storage, settings: &Settings, args: ListArgs) -> LedgerResult<()> {
    let filter = match args.filter {
        FilterArg::All => TransactionFilter::All,
        FilterArg::Last7 => {
            let days = args.days.unwrap_or(7);
            if days == 0 {
                return Err(LedgerError::Validation(
                    "--days must be at least 1".to_string(),
                ));
            }
            TransactionFilter::LastNDays(days)
        }
        FilterArg::Month => TransactionFilter::Month(month_or_current(args.month.as_deref())?),
        FilterArg::Income => TransactionFilter::IncomeOnly,
        FilterArg::Expense => TransactionFilter::ExpenseOnly,
    };

    let service = TransactionService::new(storage, &settings.categories);
    let transactions = service.list_transactions(filter);

    print!(
        "{}",
        format_transaction_table(&filter.label(), &transactions, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `balance`
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    month: Option<String>,
) -> LedgerResult<()> {
    let month = month_or_current(month.as_deref())?;
    let summary = MonthlySummary::generate(storage, month);
    print!("{}", summary.format_terminal(&settings.currency_symbol));
    Ok(())
}
