// src/config/loader.rs

use crate::config::{AppConfig, ConfigValidator};
use crate::error::{AppError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Load configuration from file (if present), then apply environment overrides and validate
pub fn load_config(config_path: &Path) -> Result<AppConfig> {
    let mut config = if config_path.exists() {
        info!("Loading configuration from file: {}", config_path.display());
        load_from_file(config_path)?
    } else {
        info!("Configuration file not found, using defaults");
        AppConfig::default()
    };

    override_with_env(&mut config);

    ConfigValidator::validate(&config)?;

    debug!("Configuration loaded and validated successfully");
    Ok(config)
}

fn load_from_file(config_path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(config_path).map_err(|_| AppError::ConfigNotFound {
        path: config_path.display().to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse {
        message: format!("Failed to parse config file: {e}"),
        line: e.location().map(|loc| loc.line()),
    })
}

fn override_with_env(config: &mut AppConfig) {
    if let Ok(redis_url) = std::env::var("REDIS_URL") {
        info!("Overriding Redis URL from environment variable");
        config.redis_url = Some(redis_url);
    }

    if let Some(port) = parse_env::<u16>("PORT") {
        info!("Overriding server port from environment variable: {}", port);
        config.server.port = port;
    }

    if let Some(enabled) = parse_env::<bool>("SCRUTINY_DEBUG") {
        info!(checks.debug = enabled, "Overriding debug mode from environment");
        config.checks.debug = enabled;
    }

    if let Some(ttl) = parse_env::<u64>("SCRUTINY_RESULT_TTL_SECS") {
        info!("Overriding result TTL from environment: {}s", ttl);
        config.checks.result_ttl_secs = ttl;
    }

    if let Some(limit) = parse_env::<usize>("SCRUTINY_HISTORY_LIMIT") {
        info!("Overriding history limit from environment: {}", limit);
        config.checks.history_limit = limit;
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Invalid {} environment variable: {}", name, raw);
            None
        }
    }
}
