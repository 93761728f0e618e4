//! Spending, income and savings analysis views

use chrono::{Datelike, Local, NaiveDate};

use crate::models::{Money, MonthKey};
use crate::storage::Storage;

use super::health::SavingsRate;
use super::summary::MonthlySummary;

/// One category's share of a total
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    pub percentage: f64,
}

/// Sort a per-category breakdown by amount, largest first, ties by name
fn shares_of<'a>(
    breakdown: impl IntoIterator<Item = (&'a String, &'a Money)>,
    total: Money,
) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = breakdown
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category: category.clone(),
            amount: *amount,
            percentage: if total.is_positive() {
                amount.minor() as f64 * 100.0 / total.minor() as f64
            } else {
                0.0
            },
        })
        .collect();

    shares.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    shares
}

/// Where the month's money went
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingAnalysis {
    pub month: MonthKey,
    pub total_expense: Money,
    /// Largest category first
    pub shares: Vec<CategoryShare>,
    /// Days counted for the burn rate
    pub days_elapsed: u32,
    /// Average spend per elapsed day
    pub daily_burn_rate: Money,
}

impl SpendingAnalysis {
    pub fn generate(storage: &Storage, month: MonthKey) -> Self {
        let summary = MonthlySummary::generate(storage, month);
        Self::from_summary(&summary, Local::now().date_naive())
    }

    /// Build the analysis as seen on `today`
    ///
    /// For the month containing `today` the burn rate divides by the day of
    /// the month; for any other month by the number of days in it.
    pub fn from_summary(summary: &MonthlySummary, today: NaiveDate) -> Self {
        let days = if summary.month.contains(today) {
            today.day()
        } else {
            summary.month.days_in_month()
        };
        let days_elapsed = days.max(1);

        Self {
            month: summary.month,
            total_expense: summary.total_expense,
            shares: shares_of(&summary.expense_by_category, summary.total_expense),
            days_elapsed,
            daily_burn_rate: Money::from_minor(
                summary.total_expense.minor() / i64::from(days_elapsed),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_expense.is_zero()
    }

    /// The largest `n` categories
    pub fn top(&self, n: usize) -> &[CategoryShare] {
        &self.shares[..self.shares.len().min(n)]
    }

    /// Format the analysis for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Analysis: {}\n",
            self.month.friendly_name()
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No spending data for this month.\n");
            return output;
        }

        for share in &self.shares {
            output.push_str(&format!(
                "{:<15} {:<50} {:>5.1}%\n",
                share.category,
                "#".repeat((share.percentage / 2.0) as usize),
                share.percentage
            ));
        }

        let top: Vec<String> = self
            .top(3)
            .iter()
            .map(|s| format!("{} ({})", s.category, s.amount.format_with_symbol(currency)))
            .collect();

        output.push('\n');
        output.push_str(&format!("Top Spending Categories: {}\n", top.join(", ")));
        output.push_str(&format!(
            "Average Daily Expense (Burn Rate): {}\n",
            self.daily_burn_rate.format_with_symbol(currency)
        ));

        output
    }
}

/// Where the month's income came from
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeAnalysis {
    pub month: MonthKey,
    pub total_income: Money,
    /// Largest source first
    pub sources: Vec<CategoryShare>,
}

impl IncomeAnalysis {
    pub fn generate(storage: &Storage, month: MonthKey) -> Self {
        Self::from_summary(&MonthlySummary::generate(storage, month))
    }

    pub fn from_summary(summary: &MonthlySummary) -> Self {
        Self {
            month: summary.month,
            total_income: summary.total_income,
            sources: shares_of(&summary.income_by_category, summary.total_income),
        }
    }

    /// Format the analysis for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Income Analysis: {}\n", self.month.friendly_name()));
        output.push_str(&"=".repeat(44));
        output.push('\n');

        if self.total_income.is_zero() {
            output.push_str("No income data for this month.\n");
            return output;
        }

        output.push_str(&format!("{:<15} {:>16} {:>10}\n", "Source", "Amount", "Share"));
        output.push_str(&"-".repeat(44));
        output.push('\n');
        for source in &self.sources {
            output.push_str(&format!(
                "{:<15} {:>16} {:>9.1}%\n",
                source.category,
                source.amount.format_with_symbol(currency),
                source.percentage
            ));
        }
        output.push_str(&format!(
            "\nTotal Income this month: {}\n",
            self.total_income.format_with_symbol(currency)
        ));

        output
    }
}

/// Savings of one month in a trend
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsPoint {
    pub month: MonthKey,
    pub income: Money,
    pub expense: Money,
    pub savings: Money,
    pub rate: SavingsRate,
}

/// Savings over several consecutive months
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsTrend {
    /// Newest month first
    pub points: Vec<SavingsPoint>,
}

impl SavingsTrend {
    /// Trend over `months` months ending at `end`
    pub fn generate(storage: &Storage, end: MonthKey, months: u32) -> Self {
        let transactions = storage.records.scan_all();
        let mut points = Vec::with_capacity(months.min(120) as usize);
        let mut month = end;

        for _ in 0..months {
            let summary = MonthlySummary::from_transactions(&transactions, month);
            points.push(SavingsPoint {
                month,
                income: summary.total_income,
                expense: summary.total_expense,
                savings: summary.savings,
                rate: SavingsRate::of(&summary),
            });
            month = month.prev();
        }

        Self { points }
    }

    /// Format the trend for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Savings Trend\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if let Some(latest) = self.points.first() {
            output.push_str(&format!(
                "Savings in {}: {} (rate {})\n\n",
                latest.month.friendly_name(),
                latest.savings.format_with_symbol(currency),
                latest.rate
            ));
        }

        output.push_str(&format!(
            "{:<16} {:>14} {:>14} {:>14} {:>14}\n",
            "Month", "Income", "Expenses", "Savings", "Rate"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');
        for point in &self.points {
            let rate = match point.rate {
                SavingsRate::NoIncome => "n/a".to_string(),
                rate => rate.to_string(),
            };
            output.push_str(&format!(
                "{:<16} {:>14} {:>14} {:>14} {:>14}\n",
                point.month.friendly_name(),
                point.income.format_with_symbol(currency),
                point.expense.format_with_symbol(currency),
                point.savings.format_with_symbol(currency),
                rate
            ));
        }

        output
    }
}
