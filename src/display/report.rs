//! Text formatting for assistant output, budgets and the audit history

use crate::audit::AuditEntry;
use crate::reports::{Alert, Recommendation};
use crate::storage::BudgetMap;

/// Format a list of alerts, or a reassuring line when there are none
pub fn format_alerts(alerts: &[Alert]) -> String {
    if alerts.is_empty() {
        return "No immediate alerts.\n".to_string();
    }

    let mut output = String::from("Active Alerts:\n");
    for alert in alerts {
        output.push_str(&format!("  * {}\n", alert));
    }
    output
}

/// Format recommendations as a two-column list
pub fn format_recommendations(recommendations: &[Recommendation]) -> String {
    let mut output = String::from("Smart Recommendations\n");
    output.push_str(&"=".repeat(44));
    output.push('\n');

    for rec in recommendations {
        output.push_str(&format!("* {:<22} {}\n", rec.title(), rec.description()));
    }
    output
}

/// Format the configured budget limits
pub fn format_budget_limits(budgets: &BudgetMap, currency: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = format!("{:<15} {:>14}\n", "Category", "Monthly Limit");
    output.push_str(&"-".repeat(30));
    output.push('\n');
    for (category, limit) in budgets {
        output.push_str(&format!(
            "{:<15} {:>14}\n",
            category,
            limit.format_with_symbol(currency)
        ));
    }
    output
}

/// Format audit entries, one block per entry
pub fn format_audit_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded yet.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
