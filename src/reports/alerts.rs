//! Budget and spending alerts
//!
//! Alerts are recomputed on every call and never stored.

use std::fmt;

use chrono::NaiveDate;

use crate::models::{Money, MonthKey, Transaction};
use crate::storage::{BudgetMap, Storage};

use super::summary::{transactions_in_month, MonthlySummary};
use super::utilization::utilization_percent;

/// One active alert
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// Spend reached or passed the category limit
    OverBudget {
        category: String,
        spent: Money,
        limit: Money,
    },
    /// Spend is between 80% and 100% of the limit
    BudgetWarning { category: String, utilization: f64 },
    /// A single expense larger than a fifth of the month's income
    LargeTransaction {
        date: NaiveDate,
        category: String,
        description: String,
        amount: Money,
    },
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alert::OverBudget {
                category,
                spent,
                limit,
            } => write!(
                f,
                "OVERBUDGET: You've spent {} in '{}', exceeding your budget of {}.",
                spent, category, limit
            ),
            Alert::BudgetWarning {
                category,
                utilization,
            } => write!(
                f,
                "Budget Warning: You've used {:.0}% of your '{}' budget.",
                utilization, category
            ),
            Alert::LargeTransaction {
                date,
                category,
                description,
                amount,
            } => {
                let label = if description.is_empty() {
                    category
                } else {
                    description
                };
                write!(
                    f,
                    "Large Transaction: A purchase of {} for '{}' on {} was detected.",
                    amount, label, date
                )
            }
        }
    }
}

/// Alerts for a month from current store contents
pub fn alerts_for_month(storage: &Storage, month: MonthKey) -> Vec<Alert> {
    let transactions = storage.records.scan_all();
    let budgets = storage.budgets.read_all();
    generate_alerts(&transactions, &budgets, month)
}

/// Budget alerts in category order, then large expenses in scan order
pub fn generate_alerts(
    transactions: &[Transaction],
    budgets: &BudgetMap,
    month: MonthKey,
) -> Vec<Alert> {
    let summary = MonthlySummary::from_transactions(transactions, month);
    let mut alerts = Vec::new();

    for (category, limit) in budgets {
        if !limit.is_positive() {
            continue;
        }

        let spent = summary.spent_in(category);
        let scaled = i128::from(spent.minor()) * 100;
        let limit_minor = i128::from(limit.minor());

        if scaled >= limit_minor * 100 {
            alerts.push(Alert::OverBudget {
                category: category.clone(),
                spent,
                limit: *limit,
            });
        } else if scaled >= limit_minor * 80 {
            alerts.push(Alert::BudgetWarning {
                category: category.clone(),
                utilization: utilization_percent(spent, *limit),
            });
        }
    }

    let income = summary.total_income;
    if income.is_positive() {
        // amount > 20% of income, kept in integers
        let large = transactions_in_month(transactions, month).filter(|t| {
            t.is_expense() && i128::from(t.amount.minor()) * 5 > i128::from(income.minor())
        });

        for txn in large {
            alerts.push(Alert::LargeTransaction {
                date: txn.date,
                category: txn.category.clone(),
                description: txn.description.clone(),
                amount: txn.amount,
            });
        }
    }

    alerts
}
