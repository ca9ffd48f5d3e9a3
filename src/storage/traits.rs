// src/storage/traits.rs

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Key-value store holding the memoized check result and the history.
///
/// Values are opaque strings; callers own the encoding.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Value under `key`, or `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Store `value` under `key` with no expiry
    async fn set_forever(&self, key: &str, value: String) -> Result<()>;

    /// Remove `key`. Returns whether something was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Whether a live value exists under `key`
    async fn has(&self, key: &str) -> Result<bool>;
}
