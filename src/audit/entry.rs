//! Audit entry data structures
//!
//! Defines the structure of audit log entries: what happened, to which kind
//! of record, and the record's state before and after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Money, Transaction};

/// What happened to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A transaction was appended or a budget was first set
    Create,
    /// A budget limit was replaced
    Update,
    /// A transaction was appended by a CSV import
    Import,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Import => write!(f, "IMPORT"),
        }
    }
}

/// Which store the change went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Budget,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Budget => write!(f, "Budget"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was written (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    /// Transaction identity key, or the budget category
    pub entity_id: String,

    /// One-line description of the record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Previous value, for budget updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Value after the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name: None,
            before: None,
            after: None,
        }
    }

    /// Entry for a transaction entered by hand
    pub fn transaction_appended(txn: &Transaction) -> Self {
        Self::for_transaction(Operation::Create, txn)
    }

    /// Entry for a transaction taken from an import file
    pub fn transaction_imported(txn: &Transaction) -> Self {
        Self::for_transaction(Operation::Import, txn)
    }

    fn for_transaction(operation: Operation, txn: &Transaction) -> Self {
        Self {
            entity_name: Some(txn.to_string()),
            after: serde_json::to_value(txn).ok(),
            ..Self::new(operation, EntityType::Transaction, txn.identity_key())
        }
    }

    /// Entry for a budget limit being set, with the limit it replaced
    pub fn budget_set(category: &str, previous: Option<Money>, limit: Money) -> Self {
        let operation = if previous.is_some() {
            Operation::Update
        } else {
            Operation::Create
        };

        Self {
            entity_name: Some(format!("monthly limit {}", limit)),
            before: previous.map(|m| serde_json::Value::from(m.minor())),
            after: Some(serde_json::Value::from(limit.minor())),
            ..Self::new(operation, EntityType::Budget, category.to_string())
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let (Some(before), Some(after)) = (&self.before, &self.after) {
            output.push_str(&format!("\n  {} -> {}", before, after));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn lunch() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            TransactionKind::Expense,
            "Food",
            "Lunch",
            Money::from_minor(1500),
        )
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Import.to_string(), "IMPORT");
    }

    #[test]
    fn test_transaction_entry() {
        let txn = lunch();
        let entry = AuditEntry::transaction_appended(&txn);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Transaction);
        assert_eq!(entry.entity_id, txn.identity_key());
        assert!(entry.before.is_none());
        assert_eq!(entry.after.as_ref().unwrap()["amount_minor"], 1500);

        let imported = AuditEntry::transaction_imported(&txn);
        assert_eq!(imported.operation, Operation::Import);
    }

    #[test]
    fn test_budget_entries() {
        let first = AuditEntry::budget_set("Food", None, Money::from_minor(10_000));
        assert_eq!(first.operation, Operation::Create);
        assert!(first.before.is_none());

        let changed = AuditEntry::budget_set(
            "Food",
            Some(Money::from_minor(10_000)),
            Money::from_minor(12_000),
        );
        assert_eq!(changed.operation, Operation::Update);

        let text = changed.format_human_readable();
        assert!(text.contains("UPDATE Budget Food (monthly limit 120.00)"));
        assert!(text.contains("10000 -> 12000"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::transaction_appended(&lunch());
        let text = serde_json::to_string(&entry).unwrap();

        assert!(text.contains("\"operation\":\"create\""));
        assert!(text.contains("\"entity_type\":\"transaction\""));
        assert!(!text.contains("before"));
    }
}
