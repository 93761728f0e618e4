//! Transaction display formatting
//!
//! Renders transaction listings as a table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;

/// One row of the transaction table
#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn from_transaction(txn: &Transaction, currency: &str) -> Self {
        let amount = txn.amount.format_with_symbol(currency);
        Self {
            date: txn.date_string(),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            description: truncate(&txn.description, 40),
            amount: if txn.is_expense() {
                format!("-{}", amount)
            } else {
                amount
            },
        }
    }
}

/// Format a list of transactions as a table under a title
pub fn format_transaction_table(title: &str, transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions match the filter.\n".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|t| TransactionRow::from_transaction(t, currency))
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()))
        .to_string();

    format!("Transactions ({})\n{}\n", title, table)
}

/// Confirmation line for a newly recorded transaction
pub fn format_recorded(txn: &Transaction, currency: &str) -> String {
    let mut line = format!(
        "Recorded {} of {} in '{}' on {}",
        txn.kind.as_str(),
        txn.amount.format_with_symbol(currency),
        txn.category,
        txn.date_string()
    );
    if !txn.description.is_empty() {
        line.push_str(&format!(" ({})", txn.description));
    }
    line
}

/// Truncate a string to a maximum length, adding an ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
