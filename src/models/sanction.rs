//! Sanction model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A restriction placed on a borrower by an administrator.
///
/// At most one sanction exists per borrower; applying a new one replaces the
/// old record outright. `expires_at == None` means the sanction holds until
/// the borrower's overdue loans come back and is never expired by date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Sanction {
    pub user_id: i32,
    pub reason: String,
    pub applied_by: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Sanction {
    /// Build a record created at `now`, time-bound when `duration_days` is set
    pub fn new(
        user_id: i32,
        reason: String,
        applied_by: i32,
        duration_days: Option<i64>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            reason,
            applied_by,
            created_at: now,
            expires_at: duration_days.map(|d| now + Duration::days(d)),
        }
    }

    /// Whether the sanction has passed its expiration date as of `now`.
    /// Open-ended sanctions never expire by date.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(exp) => exp < now,
            None => false,
        }
    }

    /// Whole days left on a time-bound sanction; `None` for "until return"
    pub fn days_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|exp| (exp - now).num_days())
    }
}

/// Apply-sanction request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplySanction {
    pub user_id: i32,
    pub reason: String,
    /// Days until expiration; omit for an open-ended "until return" sanction
    pub duration_days: Option<i64>,
    pub applied_by: i32,
}
