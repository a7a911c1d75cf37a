//! Loan (borrow) record as served by the library backend

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One physical-copy checkout, active (no return date) or archived.
///
/// Dates come over the wire as `yyyy-MM-dd` strings and are kept as such;
/// the due-date policy owns parsing and tolerates malformed legacy values.
/// Borrower ids can be absent on old archive rows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanRecord {
    pub id: i32,
    pub user_id: Option<i32>,
    pub specimen_id: i32,
    pub item_id: Option<i32>,
    /// Checkout date, `yyyy-MM-dd`
    pub date: Option<String>,
    /// Return date, `yyyy-MM-dd`; absent while the loan is active
    pub returned_date: Option<String>,
    /// Item title carried through for display
    #[serde(default)]
    pub title: Option<String>,
}

impl LoanRecord {
    /// Active = not yet returned
    pub fn is_active(&self) -> bool {
        self.returned_date.is_none()
    }
}
