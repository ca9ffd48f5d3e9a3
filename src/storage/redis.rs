// src/storage/redis.rs

use crate::error::Result;
use crate::storage::CacheStore;
use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Connection as RedisConnection, Pool, Runtime};
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{info, trace};

pub const DEFAULT_KEY_PREFIX: &str = "scrutiny:";

/// Redis implementation of the cache store
pub struct RedisStore {
    pool: Pool,
    key_prefix: String,
}

impl RedisStore {
    pub fn new(pool: Pool, key_prefix: Option<String>) -> Self {
        Self {
            pool,
            key_prefix: key_prefix.unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
        }
    }

    /// Builds a connection pool for `redis_url` and checks it can hand out a connection.
    pub async fn connect(redis_url: &str, key_prefix: Option<String>) -> Result<Self> {
        let pool = PoolConfig::from_url(redis_url).create_pool(Some(Runtime::Tokio1))?;
        let store = Self::new(pool, key_prefix);
        store.get_connection().await?;
        info!(redis.prefix = %store.key_prefix, "Connected to Redis cache store");
        Ok(store)
    }

    fn prefix_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    async fn get_connection(&self) -> Result<RedisConnection> {
        self.pool.get().await.map_err(Into::into)
    }
}

/// Redis expiries are whole seconds; anything shorter still lives one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        trace!("RedisStore::get: start for key '{}'", key);
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(self.prefix_key(key)).await?;
        trace!("RedisStore::get: hit = {}", value.is_some());
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        trace!("RedisStore::set: start for key '{}'", key);
        let mut conn = self.get_connection().await?;
        let _: () = conn
            .set_ex(self.prefix_key(key), value, ttl_seconds(ttl))
            .await?;
        Ok(())
    }

    async fn set_forever(&self, key: &str, value: String) -> Result<()> {
        trace!("RedisStore::set_forever: start for key '{}'", key);
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(self.prefix_key(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let removed: usize = conn.del(self.prefix_key(key)).await?;
        Ok(removed > 0)
    }

    async fn has(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let exists: bool = conn.exists(self.prefix_key(key)).await?;
        Ok(exists)
    }
}
