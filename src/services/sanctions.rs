//! Sanction lifecycle service
//!
//! Apply / remove / list / clear on top of the sanction store. One record
//! per borrower, last write wins. Expired records are swept lazily when the
//! active list is read; there is no background timer.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{sanction::ApplySanction, Sanction},
    store::SanctionStore,
};

#[derive(Clone)]
pub struct SanctionsService {
    store: Arc<dyn SanctionStore>,
}

impl SanctionsService {
    pub fn new(store: Arc<dyn SanctionStore>) -> Self {
        Self { store }
    }

    /// Apply a sanction, replacing any existing one for the borrower.
    /// The sanction counts as applied only once the store write succeeds.
    pub async fn apply(&self, request: ApplySanction, now: DateTime<Utc>) -> AppResult<Sanction> {
        if request.reason.trim().is_empty() {
            return Err(AppError::Validation("reason must not be empty".to_string()));
        }
        if let Some(days) = request.duration_days {
            if days < 1 {
                return Err(AppError::Validation(
                    "duration_days must be at least 1".to_string(),
                ));
            }
        }

        let sanction = Sanction::new(
            request.user_id,
            request.reason,
            request.applied_by,
            request.duration_days,
            now,
        );
        self.store.put(&sanction).await?;

        tracing::info!(
            user_id = sanction.user_id,
            applied_by = sanction.applied_by,
            "Sanction applied"
        );
        Ok(sanction)
    }

    /// Lift a borrower's sanction; removing an absent one is a no-op
    pub async fn remove(&self, user_id: i32) -> AppResult<()> {
        self.store.remove(user_id).await
    }

    /// All sanctions still in force as of `now`.
    /// Records past their expiration date are deleted on the way out, so a
    /// subsequent read no longer sees them. The sweep is a single store
    /// operation; an apply or remove issued concurrently lands either fully
    /// before or fully after it, never in between.
    pub async fn active(&self, now: DateTime<Utc>) -> AppResult<Vec<Sanction>> {
        self.store.sweep_expired(now).await
    }

    /// Administrative bulk reset
    pub async fn clear_all(&self) -> AppResult<()> {
        self.store.clear().await
    }
}
