//! Aggregated per-borrower overdue view (derived, never stored)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::loan::LoanRecord;

/// Which loan population the aggregation looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverdueFilter {
    /// Active loans past their due date
    Active,
    /// Archived loans that came back late
    Historical,
    /// Both populations
    Both,
}

impl Default for OverdueFilter {
    fn default() -> Self {
        OverdueFilter::Both
    }
}

/// One borrower's qualifying loans and severity maxima
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowerOverdueSummary {
    pub user_id: i32,
    /// Active loans past their due date
    pub overdue_loans: Vec<LoanRecord>,
    /// Archived loans returned after their due date
    pub late_returns: Vec<LoanRecord>,
    /// Max days past due across `overdue_loans`, 0 when empty
    pub max_days_overdue: i64,
    /// Max days late across `late_returns`, 0 when empty
    pub max_days_late: i64,
}

impl BorrowerOverdueSummary {
    /// Ranking key: the worse of the two maxima
    pub fn severity(&self) -> i64 {
        self.max_days_overdue.max(self.max_days_late)
    }
}
