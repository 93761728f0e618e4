//! Budget service
//!
//! Reads the budget table and sets one category's monthly limit with a
//! read-modify-write of the whole file.

use tracing::info;

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{CategoryCatalog, Money, TransactionKind};
use crate::storage::{BudgetMap, Storage};

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    catalog: &'a CategoryCatalog,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage, catalog: &'a CategoryCatalog) -> Self {
        Self { storage, catalog }
    }

    /// Every budget limit, ordered by category
    pub fn get_budget_map(&self) -> BudgetMap {
        self.storage.budgets.read_all()
    }

    /// Set the monthly limit of one expense category
    ///
    /// Returns the canonical category name and the previous limit, if any.
    pub fn set_budget(&self, category: &str, limit: Money) -> LedgerResult<(String, Option<Money>)> {
        if !limit.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Budget limit must be greater than zero, got {}",
                limit
            )));
        }
        if !limit.is_within_limit() {
            return Err(LedgerError::Validation(format!(
                "Budget limit must not exceed {}",
                Money::MAX_AMOUNT
            )));
        }

        let category = self
            .catalog
            .resolve(TransactionKind::Expense, category)
            .ok_or_else(|| LedgerError::unknown_category(TransactionKind::Expense, category.trim()))?
            .to_string();

        let mut budgets = self.storage.budgets.read_all();
        let previous = budgets.insert(category.clone(), limit);
        self.storage.budgets.write_all(&budgets)?;

        info!(category = %category, limit = limit.minor(), "set budget");

        self.storage
            .log_audit(&[AuditEntry::budget_set(&category, previous, limit)]);

        Ok((category, previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::LedgerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_set_and_get_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = BudgetService::new(&storage, &catalog);

        assert!(service.get_budget_map().is_empty());

        let (category, previous) = service.set_budget("food", Money::from_minor(10_000)).unwrap();
        assert_eq!(category, "Food");
        assert!(previous.is_none());

        service.set_budget("Bills", Money::from_minor(50_000)).unwrap();
        let (_, previous) = service.set_budget("Food", Money::from_minor(12_000)).unwrap();
        assert_eq!(previous, Some(Money::from_minor(10_000)));

        let budgets = service.get_budget_map();
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets["Food"], Money::from_minor(12_000));
        assert_eq!(budgets["Bills"], Money::from_minor(50_000));

        let entries = storage.audit().read_all().unwrap();
        let operations: Vec<Operation> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            operations,
            vec![Operation::Create, Operation::Create, Operation::Update]
        );
    }

    #[test]
    fn test_invalid_budgets_are_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = BudgetService::new(&storage, &catalog);

        assert!(service
            .set_budget("Food", Money::zero())
            .unwrap_err()
            .is_validation());
        assert!(service
            .set_budget("Salary", Money::from_minor(100))
            .unwrap_err()
            .is_validation());
        assert!(service
            .set_budget("Food", Money::from_minor(i64::MAX))
            .unwrap_err()
            .is_validation());
        assert!(service.get_budget_map().is_empty());
    }
}
