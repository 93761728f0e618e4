//! Daily financial check
//!
//! Today's spend measured against an even daily share of the month's
//! budgets, plus the month's alerts and a short tip.

use chrono::NaiveDate;

use crate::models::{Money, MonthKey, Transaction};
use crate::storage::{BudgetMap, Storage};

use super::alerts::{generate_alerts, Alert};
use super::summary::MonthlySummary;

/// Tip shown at the end of a daily check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyTip {
    SetBudgets,
    NoSpendingToday,
    CutBack,
    OnTrack,
}

impl DailyTip {
    pub fn message(&self) -> &'static str {
        match self {
            DailyTip::SetBudgets => "You don't have any budgets set. Creating them can help you gain control over your spending.",
            DailyTip::NoSpendingToday => "No spending today! Great job. Maybe transfer a small amount to your savings?",
            DailyTip::CutBack => "Your expenses are higher than your income this month. Look for opportunities to cut back.",
            DailyTip::OnTrack => "You're on track this month. Keep up the great work!",
        }
    }
}

/// Spending guideline for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyGuideline {
    /// Sum of budgets divided evenly over the days of the month
    pub daily_budget: Money,
    /// Guideline minus today's spend, negative when exceeded
    pub remaining_today: Money,
}

/// Result of a daily check
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCheck {
    pub date: NaiveDate,
    pub spent_today: Money,
    /// Present only when budgets exist
    pub guideline: Option<DailyGuideline>,
    pub alerts: Vec<Alert>,
    pub tip: DailyTip,
}

impl DailyCheck {
    pub fn generate(storage: &Storage, date: NaiveDate) -> Self {
        let transactions = storage.records.scan_all();
        let budgets = storage.budgets.read_all();
        Self::from_parts(&transactions, &budgets, date)
    }

    pub fn from_parts(transactions: &[Transaction], budgets: &BudgetMap, date: NaiveDate) -> Self {
        let month = MonthKey::from_date(date);

        let spent_today: Money = transactions
            .iter()
            .filter(|t| t.is_expense() && t.date == date)
            .map(|t| t.amount)
            .sum();

        let guideline = if budgets.is_empty() {
            None
        } else {
            let total_budget: Money = budgets.values().copied().sum();
            let daily_budget =
                Money::from_minor(total_budget.minor() / i64::from(month.days_in_month()));
            Some(DailyGuideline {
                daily_budget,
                remaining_today: daily_budget - spent_today,
            })
        };

        let summary = MonthlySummary::from_transactions(transactions, month);
        let tip = if budgets.is_empty() {
            DailyTip::SetBudgets
        } else if spent_today.is_zero() {
            DailyTip::NoSpendingToday
        } else if summary.savings.is_negative() {
            DailyTip::CutBack
        } else {
            DailyTip::OnTrack
        };

        Self {
            date,
            spent_today,
            guideline,
            alerts: generate_alerts(transactions, budgets, month),
            tip,
        }
    }

    /// Format the check for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Daily Financial Check ({})\n",
            self.date.format("%b %d, %Y")
        ));
        output.push_str(&"=".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "Today's Spending: {}\n",
            self.spent_today.format_with_symbol(currency)
        ));

        if let Some(guideline) = &self.guideline {
            output.push_str(&format!(
                "Daily Budget Guideline: {}\n",
                guideline.daily_budget.format_with_symbol(currency)
            ));
            output.push_str(&format!(
                "Remaining for Today: {}\n",
                guideline.remaining_today.format_with_symbol(currency)
            ));
        }

        output.push('\n');
        if self.alerts.is_empty() {
            output.push_str("No immediate alerts.\n");
        } else {
            output.push_str("Active Alerts:\n");
            for alert in &self.alerts {
                output.push_str(&format!("  * {}\n", alert));
            }
        }

        output.push_str(&format!("\nTip of the Day: {}\n", self.tip.message()));
        output
    }
}
