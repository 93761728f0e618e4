//! Rule-based recommendations
//!
//! Each rule fires at most once, in a fixed order. When nothing fires the
//! list holds a single `GreatJob`.

use crate::models::MonthKey;
use crate::storage::{BudgetMap, Storage};

use super::health::SavingsRate;
use super::summary::MonthlySummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    SetBudgets,
    /// Categories whose spend strictly exceeds their limit, in name order
    ReduceOverspending { categories: Vec<String> },
    ImproveSavingsRate,
    TrackIncome,
    GreatJob,
}

impl Recommendation {
    pub fn title(&self) -> &'static str {
        match self {
            Recommendation::SetBudgets => "Set Budgets",
            Recommendation::ReduceOverspending { .. } => "Reduce Overspending",
            Recommendation::ImproveSavingsRate => "Improve Savings Rate",
            Recommendation::TrackIncome => "Track Income",
            Recommendation::GreatJob => "Great Job!",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Recommendation::SetBudgets => "Create monthly budgets for top spending categories like 'Food' and 'Shopping' to gain better financial control.".to_string(),
            Recommendation::ReduceOverspending { categories } => format!(
                "You're over budget in {}. Review recent transactions in these areas to find potential savings.",
                categories.join(", ")
            ),
            Recommendation::ImproveSavingsRate => "Your savings rate is below 10%. Try adopting the 50/30/20 rule (50% needs, 30% wants, 20% savings) to boost it.".to_string(),
            Recommendation::TrackIncome => "No income has been recorded this month. Make sure to log all income sources to get a clear financial picture.".to_string(),
            Recommendation::GreatJob => "You're managing your finances well. Consider setting a new savings goal or increasing your investment contributions.".to_string(),
        }
    }
}

/// Recommendations for a month from current store contents
pub fn recommendations_for_month(storage: &Storage, month: MonthKey) -> Vec<Recommendation> {
    let summary = MonthlySummary::generate(storage, month);
    let budgets = storage.budgets.read_all();
    generate_recommendations(&summary, &budgets)
}

pub fn generate_recommendations(
    summary: &MonthlySummary,
    budgets: &BudgetMap,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if budgets.is_empty() {
        recommendations.push(Recommendation::SetBudgets);
    } else {
        let overspent: Vec<String> = budgets
            .iter()
            .filter(|(category, limit)| {
                limit.is_positive() && summary.spent_in(category) > **limit
            })
            .map(|(category, _)| category.clone())
            .collect();

        if !overspent.is_empty() {
            recommendations.push(Recommendation::ReduceOverspending {
                categories: overspent,
            });
        }
    }

    if SavingsRate::of(summary).is_below(10.0) {
        recommendations.push(Recommendation::ImproveSavingsRate);
    }

    if summary.total_income.is_zero() {
        recommendations.push(Recommendation::TrackIncome);
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::GreatJob);
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, category: &str, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            kind,
            category,
            "",
            Money::from_minor(amount),
        )
    }

    fn summary(transactions: &[Transaction]) -> MonthlySummary {
        MonthlySummary::from_transactions(transactions, MonthKey::parse("2024-03").unwrap())
    }

    fn budgets(entries: &[(&str, i64)]) -> BudgetMap {
        entries
            .iter()
            .map(|(c, l)| (c.to_string(), Money::from_minor(*l)))
            .collect()
    }

    #[test]
    fn test_empty_ledger() {
        let recs = generate_recommendations(&summary(&[]), &BudgetMap::new());
        assert_eq!(
            recs,
            vec![
                Recommendation::SetBudgets,
                Recommendation::ImproveSavingsRate,
                Recommendation::TrackIncome,
            ]
        );
    }

    #[test]
    fn test_great_job() {
        let month = summary(&[
            txn(TransactionKind::Income, "Salary", 100_000),
            txn(TransactionKind::Expense, "Food", 10_000),
        ]);

        let recs = generate_recommendations(&month, &budgets(&[("Food", 20_000)]));
        assert_eq!(recs, vec![Recommendation::GreatJob]);
        assert_eq!(recs[0].title(), "Great Job!");
    }

    #[test]
    fn test_overspending_is_strictly_greater() {
        let month = summary(&[
            txn(TransactionKind::Income, "Salary", 1_000_000),
            txn(TransactionKind::Expense, "Shopping", 10_001),
            txn(TransactionKind::Expense, "Food", 10_000),
            txn(TransactionKind::Expense, "Bills", 30_000),
            txn(TransactionKind::Expense, "Health", 99_999),
        ]);
        let limits = budgets(&[("Bills", 20_000), ("Food", 10_000), ("Shopping", 10_000)]);

        let recs = generate_recommendations(&month, &limits);
        assert_eq!(
            recs,
            vec![Recommendation::ReduceOverspending {
                categories: vec!["Bills".to_string(), "Shopping".to_string()],
            }]
        );
        assert!(recs[0].description().contains("Bills, Shopping"));
    }

    #[test]
    fn test_low_savings_with_income() {
        let month = summary(&[
            txn(TransactionKind::Income, "Salary", 100_000),
            txn(TransactionKind::Expense, "Bills", 95_000),
        ]);

        let recs = generate_recommendations(&month, &budgets(&[("Bills", 100_000)]));
        assert_eq!(recs, vec![Recommendation::ImproveSavingsRate]);
    }
}
