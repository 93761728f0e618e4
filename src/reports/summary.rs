//! Monthly Summary
//!
//! Income, expense and savings totals for one month, with per-category
//! breakdowns. Built from a fresh scan of the record store on every call.

use std::collections::BTreeMap;

use crate::models::{Money, MonthKey, Transaction, TransactionKind};
use crate::storage::Storage;

/// Totals for a single month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    /// Month the summary covers
    pub month: MonthKey,
    /// Sum of income amounts
    pub total_income: Money,
    /// Sum of expense amounts
    pub total_expense: Money,
    /// Income minus expense, may be negative
    pub savings: Money,
    /// Expense per category; categories with no spend are absent
    pub expense_by_category: BTreeMap<String, Money>,
    /// Income per source
    pub income_by_category: BTreeMap<String, Money>,
    /// Number of transactions in the month
    pub transaction_count: usize,
}

impl MonthlySummary {
    /// Summarize a month from the current contents of the record store
    pub fn generate(storage: &Storage, month: MonthKey) -> Self {
        Self::from_transactions(&storage.records.scan_all(), month)
    }

    /// Summarize a month from transactions that were already scanned
    pub fn from_transactions(transactions: &[Transaction], month: MonthKey) -> Self {
        let mut summary = Self {
            month,
            total_income: Money::zero(),
            total_expense: Money::zero(),
            savings: Money::zero(),
            expense_by_category: BTreeMap::new(),
            income_by_category: BTreeMap::new(),
            transaction_count: 0,
        };

        for txn in transactions_in_month(transactions, month) {
            summary.transaction_count += 1;
            let (total, by_category) = match txn.kind {
                TransactionKind::Income => {
                    (&mut summary.total_income, &mut summary.income_by_category)
                }
                TransactionKind::Expense => {
                    (&mut summary.total_expense, &mut summary.expense_by_category)
                }
            };
            *total += txn.amount;
            *by_category.entry(txn.category.clone()).or_default() += txn.amount;
        }

        summary.savings = summary.total_income - summary.total_expense;
        summary
    }

    /// Amount spent in one category this month
    pub fn spent_in(&self, category: &str) -> Money {
        self.expense_by_category
            .get(category)
            .copied()
            .unwrap_or_default()
    }

    /// Check whether the month has any transactions at all
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary: {}\n", self.month.friendly_name()));
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total Income:",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total Expenses:",
            self.total_expense.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Net Savings:",
            self.savings.format_with_symbol(currency)
        ));
        output.push_str(&format!("Transactions: {}\n", self.transaction_count));

        output
    }
}

/// Transactions whose date falls in `month`, in scan order
pub fn transactions_in_month(
    transactions: &[Transaction],
    month: MonthKey,
) -> impl Iterator<Item = &Transaction> {
    transactions
        .iter()
        .filter(move |t| month.matches(&t.date_string()))
}
