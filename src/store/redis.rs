//! Redis-backed sanction store
//!
//! All records live in a single hash keyed by borrower id, JSON-encoded.
//! Redis executes commands one at a time, which gives the per-borrower
//! write serialization the store contract asks for. Expiry deletions go
//! through a compare-then-delete script so a record replaced after the
//! sweep's read is never destroyed.

use ::redis::{AsyncCommands, Client, Script};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::Sanction,
};

use super::SanctionStore;

const SANCTIONS_KEY: &str = "circulade:sanctions";

/// HDEL only while the field still holds the payload the sweep read
const GUARDED_HDEL: &str = r#"
if redis.call('HGET', KEYS[1], ARGV[1]) == ARGV[2] then
    return redis.call('HDEL', KEYS[1], ARGV[1])
end
return 0
"#;

#[derive(Clone)]
pub struct RedisSanctionStore {
    client: Client,
}

impl RedisSanctionStore {
    /// Create the store and verify the connection
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Store(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Store(format!("Failed to connect to Redis: {}", e)))?;

        ::redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Store(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<::redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Store(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl SanctionStore for RedisSanctionStore {
    async fn put(&self, sanction: &Sanction) -> AppResult<()> {
        let mut conn = self.connection().await?;
        let payload = serde_json::to_string(sanction)?;
        conn.hset::<_, _, _, ()>(SANCTIONS_KEY, sanction.user_id, payload)
            .await
            .map_err(|e| AppError::Store(format!("Failed to write sanction: {}", e)))?;
        Ok(())
    }

    async fn remove(&self, user_id: i32) -> AppResult<()> {
        let mut conn = self.connection().await?;
        // HDEL on a missing field is a no-op, which matches the contract
        conn.hdel::<_, _, ()>(SANCTIONS_KEY, user_id)
            .await
            .map_err(|e| AppError::Store(format!("Failed to remove sanction: {}", e)))?;
        Ok(())
    }

    async fn sweep_expired(&self, now: DateTime<Utc>) -> AppResult<Vec<Sanction>> {
        let mut conn = self.connection().await?;
        let raw: HashMap<String, String> = conn
            .hgetall(SANCTIONS_KEY)
            .await
            .map_err(|e| AppError::Store(format!("Failed to list sanctions: {}", e)))?;

        let mut active = Vec::with_capacity(raw.len());
        for (field, payload) in raw {
            let sanction = match serde_json::from_str::<Sanction>(&payload) {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("Skipping corrupt sanction record for {}: {}", field, e);
                    continue;
                }
            };
            if sanction.is_expired(now) {
                // The script deletes only if the payload is unchanged, so an
                // apply that replaced this record since HGETALL keeps its write
                Script::new(GUARDED_HDEL)
                    .key(SANCTIONS_KEY)
                    .arg(&field)
                    .arg(&payload)
                    .invoke_async::<_, i32>(&mut conn)
                    .await
                    .map_err(|e| AppError::Store(format!("Failed to sweep sanction: {}", e)))?;
                tracing::debug!("Swept expired sanction for {}", field);
            } else {
                active.push(sanction);
            }
        }
        // HGETALL order is unspecified
        active.sort_by_key(|s| s.user_id);
        Ok(active)
    }

    async fn clear(&self) -> AppResult<()> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(SANCTIONS_KEY)
            .await
            .map_err(|e| AppError::Store(format!("Failed to clear sanctions: {}", e)))?;
        Ok(())
    }
}
