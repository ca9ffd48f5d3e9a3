// src/config/app.rs

use crate::check::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Memoization and history settings for probe sweeps.
#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct CheckConfig {
    /// Bypass the result memo so every check runs the probes.
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_result_ttl")]
    pub result_ttl_secs: u64,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_result_key")]
    pub result_key: String,
    #[serde(default = "default_history_key")]
    pub history_key: String,
}

impl CheckConfig {
    pub fn result_ttl(&self) -> Duration {
        Duration::from_secs(self.result_ttl_secs)
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            debug: false,
            result_ttl_secs: default_result_ttl(),
            history_limit: default_history_limit(),
            result_key: default_result_key(),
            history_key: default_history_key(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub checks: CheckConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default)]
    pub redis_key_prefix: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_result_ttl() -> u64 {
    60
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_result_key() -> String {
    "current-result".to_string()
}

fn default_history_key() -> String {
    "result-history".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
