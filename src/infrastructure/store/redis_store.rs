//! Redis-backed link store.

use crate::domain::entities::Link;
use crate::domain::repositories::LinkStore;
use crate::error::{AppError, map_redis_error};
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, Script, aio::ConnectionManager};
use serde_json::json;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

/// Namespace for link records.
pub const KEY_PREFIX: &str = "shortlink:";

/// Increments `hitCount` inside Redis so concurrent redirects cannot lose hits.
///
/// Returns the updated record, or nil when the key does not exist.
const INCREMENT_HITS_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
  return nil
end
local link = cjson.decode(raw)
link.hitCount = (tonumber(link.hitCount) or 0) + 1
local encoded = cjson.encode(link)
redis.call('SET', KEYS[1], encoded)
return encoded
"#;

/// Link store backed by Redis string keys holding JSON records.
///
/// Uses `ConnectionManager` for automatic reconnection. Unlike a cache, every
/// failure is propagated: the store is the only copy of the data.
pub struct RedisLinkStore {
    conn: ConnectionManager,
    increment_script: Script,
}

impl RedisLinkStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// The initial connection is retried `retries` times with jittered
    /// exponential backoff, so the service survives starting slightly before
    /// Redis does.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, every connection attempt fails,
    /// or the PING health check fails.
    pub async fn connect(redis_url: &str, retries: usize) -> Result<Self> {
        let client = Client::open(redis_url).context("Failed to create Redis client")?;

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(retries);

        let manager = Retry::start(strategy, || {
            let client = client.clone();
            async move {
                ConnectionManager::new(client).await.inspect_err(|e| {
                    warn!("Redis connection attempt failed: {}", e);
                })
            }
        })
        .await
        .context("Failed to connect to Redis")?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .context("Redis PING failed")?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn: manager,
            increment_script: Script::new(INCREMENT_HITS_SCRIPT),
        })
    }
}

/// Builds the namespaced key of a link record.
pub fn link_key(code: &str) -> String {
    format!("{KEY_PREFIX}{code}")
}

fn decode_link(code: &str, raw: &str) -> Result<Link, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        AppError::internal(
            "Corrupted link record",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn get(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn.get(link_key(code)).await.map_err(map_redis_error)?;

        raw.map(|raw| decode_link(code, &raw)).transpose()
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();

        conn.exists(link_key(code)).await.map_err(map_redis_error)
    }

    async fn insert(&self, link: &Link) -> Result<bool, AppError> {
        let payload = serde_json::to_string(link).map_err(|e| {
            AppError::internal("Failed to encode link", json!({ "reason": e.to_string() }))
        })?;
        let mut conn = self.conn.clone();

        let inserted: bool = conn
            .set_nx(link_key(&link.short_code), payload)
            .await
            .map_err(map_redis_error)?;

        if inserted {
            debug!("Store SET: {} -> {}", link.short_code, link.original_url);
        } else {
            debug!("Store SET skipped, code taken: {}", link.short_code);
        }

        Ok(inserted)
    }

    async fn increment_hits(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = self
            .increment_script
            .key(link_key(code))
            .invoke_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        raw.map(|raw| decode_link(code, &raw)).transpose()
    }

    async fn ping(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_key_is_namespaced() {
        assert_eq!(link_key("aZ09bY18"), "shortlink:aZ09bY18");
    }

    #[test]
    fn test_decode_link_rejects_garbage() {
        let result = decode_link("aZ09bY18", "not json");
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[test]
    fn test_increment_script_targets_hit_count_field() {
        // The script edits the serialized record in place; the field name must
        // match the serde representation of `Link`.
        let link = Link::new("aZ09bY18".to_string(), "https://a.io".to_string(), chrono::Utc::now());
        let value = serde_json::to_value(&link).unwrap();

        assert!(value.get("hitCount").is_some());
        assert!(INCREMENT_HITS_SCRIPT.contains("link.hitCount"));
    }
}
