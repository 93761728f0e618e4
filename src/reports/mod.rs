//! Reports module for pocket-ledger
//!
//! Monthly aggregation and everything derived from it: budget utilization,
//! savings rate, the health score, alerts, recommendations and the analysis
//! views. Every report rescans storage when generated.

pub mod alerts;
pub mod analysis;
pub mod daily;
pub mod health;
pub mod recommendations;
pub mod summary;
pub mod utilization;

pub use alerts::{alerts_for_month, generate_alerts, Alert};
pub use analysis::{CategoryShare, IncomeAnalysis, SavingsPoint, SavingsTrend, SpendingAnalysis};
pub use daily::{DailyCheck, DailyGuideline, DailyTip};
pub use health::{HealthScore, HealthTier, SavingsRate};
pub use recommendations::{generate_recommendations, recommendations_for_month, Recommendation};
pub use summary::MonthlySummary;
pub use utilization::{BudgetStatus, UtilizationReport, UtilizationRow};

use crate::models::MonthKey;
use crate::storage::Storage;

/// Summarize one month from the current contents of the record store
pub fn monthly_summary(storage: &Storage, month: MonthKey) -> MonthlySummary {
    MonthlySummary::generate(storage, month)
}
