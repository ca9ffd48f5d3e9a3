// src/config/validation.rs

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use tracing::{debug, warn};
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &AppConfig) -> Result<()> {
        debug!("Starting configuration validation");

        if let Err(e) = Self::validate_checks(config) {
            warn!("Check config validation failed: {}", e);
            return Err(e);
        }

        if let Err(e) = Self::validate_redis_config(config) {
            warn!("Redis config validation failed: {}", e);
            return Err(e);
        }

        debug!("Configuration validation completed successfully");
        Ok(())
    }

    fn validate_checks(config: &AppConfig) -> Result<()> {
        let checks = &config.checks;

        if checks.result_ttl_secs == 0 {
            return Err(AppError::config_validation(
                "Result TTL cannot be 0",
                Some("checks.result_ttl_secs"),
            ));
        }

        if checks.history_limit == 0 {
            return Err(AppError::config_validation(
                "History limit cannot be 0",
                Some("checks.history_limit"),
            ));
        }

        if checks.result_key.trim().is_empty() || checks.history_key.trim().is_empty() {
            return Err(AppError::config_validation(
                "Cache keys cannot be empty",
                Some("checks.result_key"),
            ));
        }

        if checks.result_key == checks.history_key {
            return Err(AppError::config_validation(
                format!(
                    "Result key and history key must differ (both are '{}')",
                    checks.result_key
                ),
                Some("checks.history_key"),
            ));
        }

        Ok(())
    }

    fn validate_redis_config(config: &AppConfig) -> Result<()> {
        if let Some(redis_url) = &config.redis_url {
            let url = Url::parse(redis_url).map_err(|e| {
                AppError::config_validation(
                    format!("Invalid URL in redis_url: {redis_url} - {e}"),
                    Some("redis_url"),
                )
            })?;

            match url.scheme() {
                "redis" | "rediss" | "redis+unix" | "unix" => {}
                scheme => {
                    return Err(AppError::config_validation(
                        format!("Unsupported redis scheme '{scheme}'"),
                        Some("redis_url"),
                    ))
                }
            }
        }
        Ok(())
    }
}
