//! In-memory sanction store
//!
//! Drop-in substitute for the Redis store, used by the unit tests. A single
//! mutex around the map serializes every operation; the expiry sweep runs
//! under one lock hold, so no apply or remove can interleave with it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::{
    error::{AppError, AppResult},
    models::Sanction,
};

use super::SanctionStore;

#[derive(Default)]
pub struct MemorySanctionStore {
    records: Mutex<BTreeMap<i32, Sanction>>,
}

impl MemorySanctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> AppResult<MutexGuard<'_, BTreeMap<i32, Sanction>>> {
        self.records
            .lock()
            .map_err(|_| AppError::Store("sanction store lock poisoned".to_string()))
    }
}

#[async_trait]
impl SanctionStore for MemorySanctionStore {
    async fn put(&self, sanction: &Sanction) -> AppResult<()> {
        self.records()?.insert(sanction.user_id, sanction.clone());
        Ok(())
    }

    async fn remove(&self, user_id: i32) -> AppResult<()> {
        self.records()?.remove(&user_id);
        Ok(())
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<Sanction>> {
        let mut records = self.records()?;
        records.retain(|_, s| !s.is_expired(now));
        Ok(records.values().cloned().collect())
    }

    async fn clear(&self) -> AppResult<()> {
        self.records()?.clear();
        Ok(())
    }
}
