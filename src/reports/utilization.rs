//! Budget Utilization Report
//!
//! Spend against limit for every budgeted category in a month, with an
//! overall figure across budgeted categories only.

use std::fmt;

use crate::models::{Money, MonthKey};
use crate::storage::{BudgetMap, Storage};

use super::summary::MonthlySummary;

/// Traffic-light status of one budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Ok,
    /// At least 70% of the limit spent
    Warning,
    /// The whole limit spent or more
    Over,
}

impl BudgetStatus {
    /// Classify spend against a limit using exact integer comparisons
    pub fn classify(spent: Money, limit: Money) -> Self {
        if !limit.is_positive() {
            return BudgetStatus::Ok;
        }

        let spent = i128::from(spent.minor()) * 100;
        let limit = i128::from(limit.minor());
        if spent >= limit * 100 {
            BudgetStatus::Over
        } else if spent >= limit * 70 {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Ok
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Ok => write!(f, "OK"),
            BudgetStatus::Warning => write!(f, "WARN"),
            BudgetStatus::Over => write!(f, "OVER"),
        }
    }
}

/// Percentage of `limit` covered by `spent`, 0 when there is no limit
pub fn utilization_percent(spent: Money, limit: Money) -> f64 {
    if limit.is_positive() {
        spent.minor() as f64 * 100.0 / limit.minor() as f64
    } else {
        0.0
    }
}

/// Utilization of one budgeted category
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationRow {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    /// Limit minus spend, negative when overspent
    pub remaining: Money,
    pub utilization: f64,
    pub status: BudgetStatus,
}

/// Budget utilization for one month
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationReport {
    pub month: MonthKey,
    /// One row per budgeted category, in category order
    pub rows: Vec<UtilizationRow>,
    /// Sum of limits
    pub total_budget: Money,
    /// Spend across budgeted categories only
    pub total_spent: Money,
    pub total_remaining: Money,
    pub overall_utilization: f64,
    /// Categories with spend this month but no budget
    pub unbudgeted: Vec<(String, Money)>,
}

impl UtilizationReport {
    /// Generate the report from current store contents
    pub fn generate(storage: &Storage, month: MonthKey) -> Self {
        let summary = MonthlySummary::generate(storage, month);
        let budgets = storage.budgets.read_all();
        Self::from_parts(&summary, &budgets)
    }

    /// Build the report from an existing summary and budget map
    pub fn from_parts(summary: &MonthlySummary, budgets: &BudgetMap) -> Self {
        let mut rows = Vec::with_capacity(budgets.len());
        let mut total_budget = Money::zero();
        let mut total_spent = Money::zero();

        for (category, limit) in budgets {
            let spent = summary.spent_in(category);
            total_budget += *limit;
            total_spent += spent;

            rows.push(UtilizationRow {
                category: category.clone(),
                limit: *limit,
                spent,
                remaining: *limit - spent,
                utilization: utilization_percent(spent, *limit),
                status: BudgetStatus::classify(spent, *limit),
            });
        }

        let unbudgeted = summary
            .expense_by_category
            .iter()
            .filter(|(category, _)| !budgets.contains_key(*category))
            .map(|(category, spent)| (category.clone(), *spent))
            .collect();

        Self {
            month: summary.month,
            rows,
            total_budget,
            total_spent,
            total_remaining: total_budget - total_spent,
            overall_utilization: utilization_percent(total_spent, total_budget),
            unbudgeted,
        }
    }

    /// Check whether any budgets exist
    pub fn has_budgets(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Check whether budgeted spend exceeds the total budget
    pub fn is_over_total(&self) -> bool {
        self.total_spent > self.total_budget
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Budget vs. Spending: {}\n",
            self.month.friendly_name()
        ));
        output.push_str(&"=".repeat(86));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets set. Use 'pocket budget set' to create one.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<15} {:>12} {:>12} {:>12} {:<22} {:>6}\n",
            "Category", "Budget", "Spent", "Remaining", "Utilization", "Status"
        ));
        output.push_str(&"-".repeat(86));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<15} {:>12} {:>12} {:>12} {:<22} {:>6}\n",
                row.category,
                row.limit.format_with_symbol(currency),
                row.spent.format_with_symbol(currency),
                row.remaining.format_with_symbol(currency),
                progress_bar(row.utilization, 14),
                row.status
            ));
        }

        output.push_str(&"-".repeat(86));
        output.push('\n');
        output.push_str(&format!(
            "Overall Budget:  {}\n",
            self.total_budget.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total Spent:     {}\n",
            self.total_spent.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total Remaining: {}\n",
            self.total_remaining.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Utilization:     {:.1}%\n",
            self.overall_utilization
        ));

        if !self.unbudgeted.is_empty() {
            output.push_str("\nUnbudgeted spending:\n");
            for (category, spent) in &self.unbudgeted {
                output.push_str(&format!(
                    "  {:<13} {:>12}\n",
                    category,
                    spent.format_with_symbol(currency)
                ));
            }
        }

        if self.is_over_total() {
            output.push_str("\nYou are over your total monthly budget!\n");
        }

        output
    }
}

/// Render a percentage as a fixed-width bar, clamped at 100%
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>5.1}%",
        "#".repeat(filled),
        " ".repeat(width - filled),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionKind};
    use chrono::NaiveDate;

    fn money(minor: i64) -> Money {
        Money::from_minor(minor)
    }

    fn expense(date: &str, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            TransactionKind::Expense,
            category,
            "",
            money(amount),
        )
    }

    fn march() -> MonthKey {
        MonthKey::parse("2024-03").unwrap()
    }

    #[test]
    fn test_status_boundaries() {
        let limit = money(10_000);
        assert_eq!(BudgetStatus::classify(money(10_000), limit), BudgetStatus::Over);
        assert_eq!(BudgetStatus::classify(money(12_000), limit), BudgetStatus::Over);
        assert_eq!(BudgetStatus::classify(money(9_999), limit), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(money(8_000), limit), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(money(7_000), limit), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(money(6_999), limit), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::classify(money(5_000), limit), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::classify(money(0), limit), BudgetStatus::Ok);
    }

    #[test]
    fn test_status_with_uneven_limit() {
        // 70% of 333 is 233.1, so 233 is still under the warning line
        assert_eq!(BudgetStatus::classify(money(233), money(333)), BudgetStatus::Ok);
        assert_eq!(BudgetStatus::classify(money(234), money(333)), BudgetStatus::Warning);
    }

    #[test]
    fn test_zero_limit_is_zero_utilization() {
        assert_eq!(utilization_percent(money(500), Money::zero()), 0.0);
        assert_eq!(BudgetStatus::classify(money(500), Money::zero()), BudgetStatus::Ok);
    }

    #[test]
    fn test_report_rows_and_totals() {
        let transactions = vec![
            expense("2024-03-02", "Food", 8_000),
            expense("2024-03-03", "Bills", 12_000),
            expense("2024-03-04", "Shopping", 4_000),
        ];
        let summary = MonthlySummary::from_transactions(&transactions, march());
        let budgets: BudgetMap = [
            ("Food".to_string(), money(10_000)),
            ("Bills".to_string(), money(10_000)),
            ("Health".to_string(), money(5_000)),
        ]
        .into_iter()
        .collect();

        let report = UtilizationReport::from_parts(&summary, &budgets);

        let categories: Vec<&str> = report.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Bills", "Food", "Health"]);
        assert_eq!(report.rows[0].status, BudgetStatus::Over);
        assert_eq!(report.rows[0].remaining, money(-2_000));
        assert_eq!(report.rows[1].status, BudgetStatus::Warning);
        assert_eq!(report.rows[1].utilization, 80.0);
        assert_eq!(report.rows[2].spent, Money::zero());

        assert_eq!(report.total_budget, money(25_000));
        assert_eq!(report.total_spent, money(20_000));
        assert_eq!(report.overall_utilization, 80.0);
        assert_eq!(report.unbudgeted, vec![("Shopping".to_string(), money(4_000))]);
    }

    #[test]
    fn test_unbudgeted_spend_excluded_from_overall() {
        let transactions = vec![expense("2024-03-02", "Food", 50_000)];
        let summary = MonthlySummary::from_transactions(&transactions, march());
        let budgets: BudgetMap = [("Bills".to_string(), money(10_000))].into_iter().collect();

        let report = UtilizationReport::from_parts(&summary, &budgets);
        assert_eq!(report.total_spent, Money::zero());
        assert_eq!(report.overall_utilization, 0.0);
        assert!(!report.is_over_total());
        assert_eq!(report.unbudgeted[0].0, "Food");
    }

    #[test]
    fn test_no_budgets() {
        let summary = MonthlySummary::from_transactions(&[], march());
        let report = UtilizationReport::from_parts(&summary, &BudgetMap::new());

        assert!(!report.has_budgets());
        assert_eq!(report.overall_utilization, 0.0);
        assert!(report.format_terminal("$").contains("No budgets set"));
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(150.0, 4), "[####] 150.0%");
        assert_eq!(progress_bar(0.0, 4), "[    ]   0.0%");
    }
}
