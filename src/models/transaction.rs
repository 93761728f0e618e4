//! Transaction model
//!
//! A transaction is a single dated income or expense entry. Transactions are
//! immutable once written: the ledger only ever appends them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// The value stored in the `type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Category name (expense category or income source)
    pub category: String,

    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,

    /// Amount in minor units, always positive
    #[serde(rename = "amount_minor")]
    pub amount: Money,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            description: description.into(),
            amount,
        }
    }

    /// Check if this is an income transaction
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if this is an expense transaction
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The ISO `YYYY-MM-DD` form of the date, as stored on disk
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Key used to recognise the same transaction during CSV import
    pub fn identity_key(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.date_string(),
            self.kind.as_str(),
            self.amount.minor(),
            self.description
        )
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date_string(),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Parse a stored `YYYY-MM-DD` date
///
/// Only the zero-padded form is accepted, so the text and the parsed date
/// always fall in the same month under prefix matching.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    (date.format("%Y-%m-%d").to_string() == text).then_some(date)
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyCategory,
    UnknownKind(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} is larger than the maximum of {}",
                amount,
                Money::MAX_AMOUNT
            ),
            Self::EmptyCategory => write!(f, "Category is required"),
            Self::UnknownKind(kind) => {
                write!(f, "Unknown transaction type '{}' (expected income or expense)", kind)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
