//! Category catalog
//!
//! The fixed lists of expense categories and income sources offered when a
//! transaction or budget is entered. The lists are data: they come from the
//! settings file and are handed to the services, so they can be replaced.

use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Default expense categories
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Other",
];

/// Default income sources
pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Gift",
    "Other",
];

/// The category lists accepted at entry time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCatalog {
    /// Categories for expense transactions and budgets
    pub expense: Vec<String>,
    /// Sources for income transactions
    pub income: Vec<String>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES)
    }
}

impl CategoryCatalog {
    /// Build a catalog from explicit lists
    pub fn new<S: AsRef<str>>(expense: &[S], income: &[S]) -> Self {
        Self {
            expense: expense.iter().map(|s| s.as_ref().to_string()).collect(),
            income: income.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Categories valid for the given kind
    pub fn categories_for(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    /// Find the canonical spelling of a category, ignoring case
    pub fn resolve(&self, kind: TransactionKind, name: &str) -> Option<&str> {
        let name = name.trim();
        self.categories_for(kind)
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn is_expense_category(&self, name: &str) -> bool {
        self.resolve(TransactionKind::Expense, name).is_some()
    }

    pub fn is_income_category(&self, name: &str) -> bool {
        self.resolve(TransactionKind::Income, name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.expense.len(), 7);
        assert_eq!(catalog.income.len(), 6);
        assert!(catalog.is_expense_category("Other"));
        assert!(catalog.is_income_category("Other"));
        assert!(!catalog.is_expense_category("Salary"));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = CategoryCatalog::default();
        assert_eq!(catalog.resolve(TransactionKind::Expense, "food"), Some("Food"));
        assert_eq!(
            catalog.resolve(TransactionKind::Income, " FREELANCE "),
            Some("Freelance")
        );
        assert_eq!(catalog.resolve(TransactionKind::Income, "Food"), None);
    }

    #[test]
    fn test_synthetic_catalog() {
        let catalog = CategoryCatalog::new(&["Rockets"], &["Grants"]);
        assert!(catalog.is_expense_category("rockets"));
        assert!(!catalog.is_expense_category("Food"));
        assert_eq!(catalog.categories_for(TransactionKind::Income), ["Grants"]);
    }
}
