//! Sanction store
//!
//! One record per borrower. `put` replaces any prior record for the same
//! borrower (last write wins), `remove` is a no-op on unknown borrowers.
//! The store is the only stateful piece of the service; implementations
//! must serialize writes per borrower key, and the expiry sweep must not
//! delete a record that was replaced after it was read.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{error::AppResult, models::Sanction};

pub use self::memory::MemorySanctionStore;
pub use self::redis::RedisSanctionStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SanctionStore: Send + Sync {
    /// Persist a record, replacing any prior record for the borrower
    async fn put(&self, sanction: &Sanction) -> AppResult<()>;

    /// Delete the borrower's record if present
    async fn remove(&self, user_id: i32) -> AppResult<()>;

    /// Delete every record expired as of `now` and return the rest.
    /// Deletion is guarded: a record written after the sweep read it is
    /// left in place, so a concurrent apply is never destroyed.
    async fn sweep_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<Sanction>>;

    /// Delete every record unconditionally
    async fn clear(&self) -> AppResult<()>;
}
