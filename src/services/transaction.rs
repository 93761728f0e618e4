//! Transaction service
//!
//! Entry-time validation and appending of transactions, plus filtered
//! listings over the record store.

use chrono::{Days, Local, NaiveDate};
use tracing::info;

use crate::audit::AuditEntry;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    parse_iso_date, CategoryCatalog, Money, MonthKey, Transaction, TransactionKind,
};
use crate::storage::Storage;

/// Which transactions a listing should include
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionFilter {
    All,
    /// The last N calendar days, today included
    LastNDays(u32),
    Month(MonthKey),
    IncomeOnly,
    ExpenseOnly,
}

impl TransactionFilter {
    /// Check whether a transaction passes the filter relative to `today`
    pub fn matches(&self, txn: &Transaction, today: NaiveDate) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::LastNDays(days) => {
                match today.checked_sub_days(Days::new(u64::from(*days))) {
                    Some(cutoff) => txn.date > cutoff,
                    None => true,
                }
            }
            TransactionFilter::Month(month) => month.matches(&txn.date_string()),
            TransactionFilter::IncomeOnly => txn.is_income(),
            TransactionFilter::ExpenseOnly => txn.is_expense(),
        }
    }

    /// Short label used as a listing title
    pub fn label(&self) -> String {
        match self {
            TransactionFilter::All => "All".to_string(),
            TransactionFilter::LastNDays(days) => format!("Last {} days", days),
            TransactionFilter::Month(month) => month.friendly_name(),
            TransactionFilter::IncomeOnly => "Income only".to_string(),
            TransactionFilter::ExpenseOnly => "Expenses only".to_string(),
        }
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub amount: Money,
}

/// Service for recording and listing transactions
pub struct TransactionService<'a> {
    storage: &'a Storage,
    catalog: &'a CategoryCatalog,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage, catalog: &'a CategoryCatalog) -> Self {
        Self { storage, catalog }
    }

    /// Validate and append a new transaction
    ///
    /// Nothing is written unless every field is valid. The stored category
    /// uses the catalog's spelling.
    pub fn append_transaction(&self, input: NewTransaction) -> LedgerResult<Transaction> {
        if !input.amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Amount must be greater than zero, got {}",
                input.amount
            )));
        }

        let category = self
            .catalog
            .resolve(input.kind, &input.category)
            .ok_or_else(|| LedgerError::unknown_category(input.kind, input.category.trim()))?;

        let txn = Transaction::new(
            input.date,
            input.kind,
            category,
            input.description.trim(),
            input.amount,
        );

        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.storage.records.append(&txn)?;
        info!(kind = txn.kind.as_str(), category = %txn.category, amount = txn.amount.minor(), "recorded transaction");

        self.storage.log_audit(&[AuditEntry::transaction_appended(&txn)]);

        Ok(txn)
    }

    /// List transactions matching a filter, newest date first
    pub fn list_transactions(&self, filter: TransactionFilter) -> Vec<Transaction> {
        self.list_transactions_as_of(filter, Local::now().date_naive())
    }

    /// List transactions matching a filter relative to a given day
    pub fn list_transactions_as_of(
        &self,
        filter: TransactionFilter,
        today: NaiveDate,
    ) -> Vec<Transaction> {
        let mut transactions: Vec<Transaction> = self
            .storage
            .records
            .scan_all()
            .into_iter()
            .filter(|t| filter.matches(t, today))
            .collect();

        // Stable sort keeps write order for equal dates
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }
}

/// Parse a user-supplied ISO date
pub fn parse_date(input: &str) -> LedgerResult<NaiveDate> {
    parse_iso_date(input).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD format",
            input.trim()
        ))
    })
}

/// Parse a user-supplied amount in major units into a positive `Money`
pub fn parse_amount(input: &str) -> LedgerResult<Money> {
    let amount = Money::parse(input)
        .map_err(|e| LedgerError::Validation(format!("Invalid amount '{}': {}", input.trim(), e)))?;

    if !amount.is_positive() {
        return Err(LedgerError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    if !amount.is_within_limit() {
        return Err(LedgerError::Validation(format!(
            "Amount must not exceed {}",
            Money::MAX_AMOUNT
        )));
    }

    Ok(amount)
}

/// Parse a user-supplied `YYYY-MM` month key
pub fn parse_month(input: &str) -> LedgerResult<MonthKey> {
    MonthKey::parse(input.trim()).map_err(|e| LedgerError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn input(kind: TransactionKind, d: &str, category: &str, amount: i64) -> NewTransaction {
        NewTransaction {
            kind,
            date: date(d),
            category: category.to_string(),
            description: String::new(),
            amount: Money::from_minor(amount),
        }
    }

    #[test]
    fn test_append_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let mut new_txn = input(TransactionKind::Expense, "2024-03-10", "food", 1250);
        new_txn.description = "  Groceries ".to_string();
        let txn = service.append_transaction(new_txn).unwrap();

        assert_eq!(txn.category, "Food");
        assert_eq!(txn.description, "Groceries");
        assert_eq!(storage.records.scan_all(), vec![txn]);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_input_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        let err = service
            .append_transaction(input(TransactionKind::Expense, "2024-03-10", "Food", 0))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .append_transaction(input(TransactionKind::Expense, "2024-03-10", "Salary", 100))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .append_transaction(input(TransactionKind::Income, "2024-03-10", "Food", 100))
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(storage.records.count(), 0);
        assert!(!storage.paths().transactions_file().exists());
    }

    #[test]
    fn test_synthetic_catalog() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::new(&["Rent"], &["Pension"]);
        let service = TransactionService::new(&storage, &catalog);

        assert!(service
            .append_transaction(input(TransactionKind::Expense, "2024-03-10", "Food", 100))
            .is_err());
        assert!(service
            .append_transaction(input(TransactionKind::Expense, "2024-03-10", "RENT", 100))
            .is_ok());
    }

    #[test]
    fn test_list_filters_and_order() {
        let (_temp_dir, storage) = create_test_storage();
        let catalog = CategoryCatalog::default();
        let service = TransactionService::new(&storage, &catalog);

        for (kind, d, category, amount) in [
            (TransactionKind::Expense, "2024-02-20", "Food", 100),
            (TransactionKind::Income, "2024-03-01", "Salary", 500_000),
            (TransactionKind::Expense, "2024-03-09", "Bills", 300),
            (TransactionKind::Expense, "2024-03-03", "Food", 200),
            (TransactionKind::Expense, "2024-03-09", "Health", 400),
        ] {
            service
                .append_transaction(input(kind, d, category, amount))
                .unwrap();
        }

        let today = date("2024-03-10");
        let all = service.list_transactions_as_of(TransactionFilter::All, today);
        let amounts: Vec<i64> = all.iter().map(|t| t.amount.minor()).collect();
        assert_eq!(amounts, vec![300, 400, 200, 500_000, 100]);

        let recent = service.list_transactions_as_of(TransactionFilter::LastNDays(7), today);
        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|t| t.date > date("2024-03-03")));

        let march = MonthKey::parse("2024-03").unwrap();
        assert_eq!(
            service
                .list_transactions_as_of(TransactionFilter::Month(march), today)
                .len(),
            4
        );
        assert_eq!(
            service
                .list_transactions_as_of(TransactionFilter::IncomeOnly, today)
                .len(),
            1
        );
        assert_eq!(
            service
                .list_transactions_as_of(TransactionFilter::ExpenseOnly, today)
                .len(),
            4
        );
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_amount("12.50").unwrap().minor(), 1250);
        assert!(parse_amount("0").unwrap_err().is_validation());
        assert!(parse_amount("-3").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
        assert!(parse_amount("92233720368547758.07").unwrap_err().is_validation());
        assert!(parse_amount("10000000000.01").unwrap_err().is_validation());
        assert_eq!(
            parse_amount("10000000000").unwrap(),
            Money::MAX_AMOUNT
        );

        assert_eq!(parse_date("2024-03-01").unwrap(), date("2024-03-01"));
        assert!(parse_date("03/01/2024").unwrap_err().is_validation());
        assert!(parse_date("2024-3-5").unwrap_err().is_validation());

        assert_eq!(parse_month("2024-03").unwrap().key(), "2024-03");
        assert!(parse_month("2024-3").unwrap_err().is_validation());
    }
}
