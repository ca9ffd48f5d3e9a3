// src/state.rs

use crate::cache::ResultCache;
use crate::config::AppConfig;
use crate::error::Result;
use crate::probe::ProbeRegistry;
use crate::storage::{CacheStore, InMemoryStore};
use std::sync::Arc;
use tracing::info;

/// Shared state handed to every Axum handler.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub checks: ResultCache,
}

impl AppState {
    /// Builds the state, picking Redis as the cache store when `redis_url` is configured.
    pub async fn new(config: &AppConfig, registry: Arc<dyn ProbeRegistry>) -> Result<Self> {
        let store = Self::build_store(config).await?;
        Ok(Self::with_store(config, registry, store))
    }

    /// Builds the state on top of an existing store.
    pub fn with_store(
        config: &AppConfig,
        registry: Arc<dyn ProbeRegistry>,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        info!(
            checks.debug = config.checks.debug,
            checks.result_ttl_secs = config.checks.result_ttl_secs,
            checks.history_limit = config.checks.history_limit,
            probes.count = registry.probes().len(),
            "Creating shared AppState"
        );
        Self {
            config: config.clone(),
            checks: ResultCache::new(store, registry, config.checks.clone()),
        }
    }

    #[cfg(feature = "redis")]
    async fn build_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
        match &config.redis_url {
            Some(redis_url) => {
                let store =
                    crate::storage::RedisStore::connect(redis_url, config.redis_key_prefix.clone())
                        .await?;
                info!("Using Redis cache store.");
                Ok(Arc::new(store))
            }
            None => {
                info!("Running with in-memory cache store.");
                Ok(Arc::new(InMemoryStore::new()))
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    async fn build_store(config: &AppConfig) -> Result<Arc<dyn CacheStore>> {
        if config.redis_url.is_some() {
            return Err(crate::error::AppError::config_validation(
                "redis_url is set but the crate was built without the `redis` feature",
                Some("redis_url"),
            ));
        }
        info!("Running with in-memory cache store.");
        Ok(Arc::new(InMemoryStore::new()))
    }
}
