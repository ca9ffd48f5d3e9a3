// src/cache.rs

use crate::check::{CheckResult, ProbeRunner, ResultHistory};
use crate::config::CheckConfig;
use crate::error::Result;
use crate::probe::ProbeRegistry;
use crate::storage::CacheStore;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Value returned by [`ResultCache::get_or_compute`], tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Computed<T> {
    /// Still-valid value read from the store
    Cached(T),
    /// Value produced by running the computation on this call
    Fresh(T),
}

impl<T> Computed<T> {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Cached(value) | Self::Fresh(value) => value,
        }
    }
}

/// Memoizes probe sweeps and keeps the bounded history of their results.
///
/// The history update is a plain read, prepend, overwrite with no lock
/// around it. Two callers that both miss the memo at the same moment can
/// each append their own result, and the later write wins.
pub struct ResultCache {
    store: Arc<dyn CacheStore>,
    registry: Arc<dyn ProbeRegistry>,
    runner: ProbeRunner,
    settings: CheckConfig,
    debug: AtomicBool,
}

impl ResultCache {
    pub fn new(
        store: Arc<dyn CacheStore>,
        registry: Arc<dyn ProbeRegistry>,
        settings: CheckConfig,
    ) -> Self {
        let debug = AtomicBool::new(settings.debug);
        Self {
            store,
            registry,
            runner: ProbeRunner::new(),
            settings,
            debug,
        }
    }

    pub fn debug_mode(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    /// In debug mode every check runs the probes and the memo is never read or written.
    pub fn set_debug_mode(&self, enabled: bool) {
        let previous = self.debug.swap(enabled, Ordering::Relaxed);
        if previous != enabled {
            info!(debug = enabled, "Result memoization debug mode changed");
        }
    }

    /// Runs a sweep (or replays the memoized one) and returns the history.
    ///
    /// Only a fresh sweep is appended. A memo hit re-reads the stored history
    /// as is. The memo is written after the history, so a sweep that failed to
    /// reach the history is never replayed.
    pub async fn check(&self) -> Result<ResultHistory> {
        let bypass = self.debug_mode();
        let key = &self.settings.result_key;

        if bypass {
            debug!(cache_key = %key, "Debug mode: bypassing result cache");
        } else if self.read_memo::<CheckResult>(key).await?.is_some() {
            return self.history().await;
        }

        let probes = self.registry.probes();
        let result = self.runner.run(&probes).await;
        let encoded = if bypass {
            None
        } else {
            Some(serde_json::to_string(&result)?)
        };

        let history = self.merge_into_history(result).await?;
        if let Some(encoded) = encoded {
            self.write_memo(key, encoded, self.settings.result_ttl())
                .await?;
        }
        Ok(history)
    }

    /// Returns the live value under `key`, or computes, stores for `ttl` and returns it.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Computed<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.debug_mode() {
            debug!(cache_key = %key, "Debug mode: bypassing result cache");
            return Ok(Computed::Fresh(compute().await));
        }

        if let Some(value) = self.read_memo(key).await? {
            return Ok(Computed::Cached(value));
        }

        debug!(cache_key = %key, "Cache miss, computing");
        let value = compute().await;
        self.write_memo(key, serde_json::to_string(&value)?, ttl)
            .await?;
        Ok(Computed::Fresh(value))
    }

    async fn read_memo<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => {
                debug!(cache_key = %key, "Cache hit");
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn write_memo(&self, key: &str, encoded: String, ttl: Duration) -> Result<()> {
        self.store.set(key, encoded, ttl).await?;
        debug!(cache_key = %key, ttl_seconds = ttl.as_secs(), "Cached value");
        Ok(())
    }

    /// Stored history, or an empty one if nothing has been recorded yet.
    pub async fn history(&self) -> Result<ResultHistory> {
        let mut history = match self.store.get(&self.settings.history_key).await? {
            Some(raw) => serde_json::from_str::<ResultHistory>(&raw)?,
            None => ResultHistory::new(),
        };
        history.set_limit(self.settings.history_limit);
        Ok(history)
    }

    /// Prepends `result` to the stored history and overwrites it.
    pub async fn merge_into_history(&self, result: CheckResult) -> Result<ResultHistory> {
        let mut history = self.history().await?;
        history.prepend(result);

        self.store
            .set_forever(&self.settings.history_key, serde_json::to_string(&history)?)
            .await?;
        debug!(
            history_key = %self.settings.history_key,
            history.len = history.len(),
            "History updated"
        );
        Ok(history)
    }

    /// Drops the memoized result so the next check runs the probes.
    pub async fn forget(&self) -> Result<bool> {
        let removed = self.store.delete(&self.settings.result_key).await?;
        debug!(cache_key = %self.settings.result_key, removed, "Forgot memoized result");
        Ok(removed)
    }
}

impl std::fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultCache")
            .field("settings", &self.settings)
            .field("debug", &self.debug_mode())
            .finish_non_exhaustive()
    }
}
