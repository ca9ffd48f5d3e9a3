//! Error handling for the probe orchestrator
//!
//! Probe-level problems never show up here; they are classified inside the
//! check result. `AppError` covers the infrastructure the orchestrator
//! depends on (the cache store, configuration, serialization), which has no
//! meaningful local recovery and is handed back to the caller.

pub mod types;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// Error body following RFC 7807 Problem Details
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
    pub request_id: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String, line: Option<usize> },

    // Storage errors
    #[error("Redis connection failed: {message}")]
    RedisConnection { message: String },

    #[error("Redis operation failed: {operation} - {message}")]
    RedisOperation { operation: String, message: String },

    #[error("Cache store failed: {operation} - {message}")]
    Storage { operation: String, message: String },

    // Lookup errors
    #[error("Not found: {0}")]
    NotFound(String),

    // System errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO operation failed: {operation} - {message}")]
    Io { operation: String, message: String },
}

impl AppError {
    pub fn config_validation(message: impl Into<String>, field: Option<impl Into<String>>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
            field: field.map(Into::into),
        }
    }

    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            Self::ConfigValidation { .. }
            | Self::ConfigNotFound { .. }
            | Self::ConfigParse { .. }
            | Self::Serialization { .. }
            | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,

            Self::RedisConnection { .. }
            | Self::RedisOperation { .. }
            | Self::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Error type URI for the problem body
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ConfigValidation { .. } | Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => {
                "https://scrutiny.dev/errors/configuration"
            }
            Self::RedisConnection { .. } | Self::RedisOperation { .. } | Self::Storage { .. } => {
                "https://scrutiny.dev/errors/storage"
            }
            Self::NotFound(_) => "https://scrutiny.dev/errors/not-found",
            _ => "https://scrutiny.dev/errors/internal",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ConfigValidation { .. } | Self::ConfigNotFound { .. } | Self::ConfigParse { .. } => {
                "Configuration Error"
            }
            Self::RedisConnection { .. } | Self::RedisOperation { .. } | Self::Storage { .. } => {
                "Storage Error"
            }
            Self::NotFound(_) => "Not Found",
            _ => "Internal Server Error",
        }
    }

    pub fn log(&self, request_id: Option<&str>) {
        let request_id = request_id.unwrap_or("unknown");

        if self.status_code().is_server_error() {
            error!(
                error = %self,
                request_id = request_id,
                error_type = self.error_type(),
                "Application error occurred"
            );
        } else {
            warn!(
                error = %self,
                request_id = request_id,
                error_type = self.error_type(),
                "Client error occurred"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        self.log(Some(&request_id));

        let status = self.status_code();
        let body = ErrorResponse {
            error_type: self.error_type().to_string(),
            title: self.title().to_string(),
            status: status.as_u16(),
            detail: self.to_string(),
            instance: format!("/errors/{request_id}"),
            request_id: Some(request_id),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
