//! Financial Health Score
//!
//! A 0-100 score built from four capped sub-scores: savings rate (30),
//! budget adherence (25), income against expenses (25) and a fixed debt
//! management allowance (20).

use std::fmt;

use crate::models::{Money, MonthKey};
use crate::storage::{BudgetMap, Storage};

use super::summary::MonthlySummary;

/// Score used for the savings-rate band when there is no income
const NO_INCOME_SENTINEL: f64 = -100.0;

/// Points granted for debt management, which is not tracked
pub const DEBT_PLACEHOLDER_POINTS: u32 = 20;

/// Savings as a share of income
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SavingsRate {
    /// No income was recorded, so no rate exists
    NoIncome,
    /// Savings divided by income, in percent; negative when overspending
    Percent(f64),
}

impl SavingsRate {
    /// Savings rate from income and savings totals
    pub fn from_totals(income: Money, savings: Money) -> Self {
        if income.is_positive() {
            SavingsRate::Percent(savings.minor() as f64 * 100.0 / income.minor() as f64)
        } else {
            SavingsRate::NoIncome
        }
    }

    /// Savings rate of a month
    pub fn of(summary: &MonthlySummary) -> Self {
        Self::from_totals(summary.total_income, summary.savings)
    }

    /// Value used when comparing against thresholds
    pub fn score_value(&self) -> f64 {
        match self {
            SavingsRate::NoIncome => NO_INCOME_SENTINEL,
            SavingsRate::Percent(rate) => *rate,
        }
    }

    /// Check whether the rate is below a threshold; no income always is
    pub fn is_below(&self, threshold: f64) -> bool {
        self.score_value() < threshold
    }
}

impl fmt::Display for SavingsRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingsRate::NoIncome => write!(f, "n/a (no income)"),
            SavingsRate::Percent(rate) => write!(f, "{:.2}%", rate),
        }
    }
}

/// Overall rating of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Good,
    Medium,
    Poor,
}

impl HealthTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            HealthTier::Good
        } else if score >= 50 {
            HealthTier::Medium
        } else {
            HealthTier::Poor
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthTier::Good => write!(f, "Good"),
            HealthTier::Medium => write!(f, "Medium"),
            HealthTier::Poor => write!(f, "Poor"),
        }
    }
}

/// Financial health score for one month with its breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct HealthScore {
    pub month: MonthKey,
    pub savings_rate: SavingsRate,
    /// Out of 30
    pub savings_points: u32,
    /// Out of 25; prorated when over budget
    pub budget_points: f64,
    /// Out of 25
    pub income_expense_points: u32,
    /// Out of 20; always granted since debts are not tracked
    pub debt_placeholder: u32,
    pub has_budgets: bool,
    /// Truncated sum of the sub-scores
    pub total: u32,
    pub tier: HealthTier,
}

impl HealthScore {
    /// Score a month from current store contents
    pub fn generate(storage: &Storage, month: MonthKey) -> Self {
        let summary = MonthlySummary::generate(storage, month);
        let budgets = storage.budgets.read_all();
        Self::from_parts(&summary, &budgets)
    }

    /// Score a month from an existing summary and budget map
    pub fn from_parts(summary: &MonthlySummary, budgets: &BudgetMap) -> Self {
        let savings_rate = SavingsRate::of(summary);
        let savings_points = savings_points(savings_rate);
        let budget_points = budget_points(summary.total_expense, budgets);
        let income_expense_points =
            income_expense_points(summary.total_income, summary.total_expense);

        let sum = f64::from(savings_points)
            + budget_points
            + f64::from(income_expense_points)
            + f64::from(DEBT_PLACEHOLDER_POINTS);
        let total = sum.trunc() as u32;

        Self {
            month: summary.month,
            savings_rate,
            savings_points,
            budget_points,
            income_expense_points,
            debt_placeholder: DEBT_PLACEHOLDER_POINTS,
            has_budgets: !budgets.is_empty(),
            total,
            tier: HealthTier::from_score(total),
        }
    }

    /// Tips derived from the weakest sub-scores
    pub fn advice(&self) -> Vec<&'static str> {
        let mut tips = Vec::new();

        if self.savings_points < 20 {
            tips.push("Try to increase your savings rate to at least 10-20% of your income.");
        }
        if self.budget_points < 20.0 && !self.has_budgets {
            tips.push("Set up monthly budgets to better track and control your spending.");
        }
        if self.budget_points < 20.0 && self.has_budgets {
            tips.push("You're overspending in some categories. Review your budget vs. actuals.");
        }
        if self.income_expense_points < 15 {
            tips.push("Your expenses are high compared to your income. Look for areas to cut back.");
        }
        if tips.is_empty() {
            tips.push("You're doing great! Keep up the good work.");
        }

        tips
    }

    /// Format the score for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Financial Health Score: {}\n",
            self.month.friendly_name()
        ));
        output.push_str(&"=".repeat(44));
        output.push('\n');
        output.push_str(&format!("Score: {} / 100 ({})\n\n", self.total, self.tier));

        output.push_str(&format!("{:<34} {:>3} / 30\n", "Savings Rate", self.savings_points));
        output.push_str(&format!(
            "{:<34} {:>3} / 25\n",
            "Budget Adherence",
            self.budget_points.trunc() as u32
        ));
        output.push_str(&format!(
            "{:<34} {:>3} / 25\n",
            "Income vs. Expenses", self.income_expense_points
        ));
        output.push_str(&format!(
            "{:<34} {:>3} / 20\n",
            "Debt Management (placeholder)", self.debt_placeholder
        ));
        output.push_str(&format!("\nSavings rate: {}\n", self.savings_rate));

        output.push_str("\nRecommendations:\n");
        for tip in self.advice() {
            output.push_str(&format!("  * {}\n", tip));
        }

        output
    }
}

fn savings_points(rate: SavingsRate) -> u32 {
    let rate = rate.score_value();
    if rate >= 20.0 {
        30
    } else if rate >= 10.0 {
        20
    } else if rate > 0.0 {
        10
    } else {
        0
    }
}

/// Budget adherence compares the whole month's spend with the sum of limits
fn budget_points(total_expense: Money, budgets: &BudgetMap) -> f64 {
    if budgets.is_empty() {
        return 5.0;
    }

    let total_budget: Money = budgets.values().copied().sum();
    if !total_budget.is_positive() {
        return 0.0;
    }
    if total_expense <= total_budget {
        return 25.0;
    }

    let overspend_ratio =
        (total_expense - total_budget).minor() as f64 / total_budget.minor() as f64;
    (25.0 - overspend_ratio * 50.0).max(0.0)
}

fn income_expense_points(income: Money, expense: Money) -> u32 {
    let ratio = if expense.is_positive() {
        income.minor() as f64 / expense.minor() as f64
    } else {
        2.0
    };

    if ratio >= 1.5 {
        25
    } else if ratio >= 1.0 {
        15
    } else {
        0
    }
}
