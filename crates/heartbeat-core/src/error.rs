//! Core error types for heartbeat-core.
//!
//! Only a handful of failures are fatal to a heartbeat run (a malformed
//! config file, an unwritable output directory). Everything raised inside a
//! check provider is caught at the provider boundary and rendered as text,
//! so most of these variants end up as a `Display` string in the report.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for heartbeat-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// OAuth-related errors
    #[error("OAuth error: {0}")]
    OAuth(#[from] OAuthError),

    /// Upstream API returned an error payload or a non-success status
    #[error("{service} API error ({status}): {message}")]
    Api {
        service: String,
        status: u16,
        message: String,
    },

    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid endpoint URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Config file exists but is not valid JSON for the expected shape
    #[error("Failed to parse configuration at {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// OAuth-specific errors.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// Token refresh failed
    #[error("Token refresh failed: {0}")]
    TokenRefreshFailed(String),
}

impl CoreError {
    /// Build an [`CoreError::Api`] from a response body, pulling the most
    /// useful message out of the usual `{"error": ...}` envelopes.
    pub fn api(service: &str, status: u16, body: &str) -> Self {
        CoreError::Api {
            service: service.to_string(),
            status,
            message: extract_error_message(body),
        }
    }
}

fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let error = &value["error"];
    if let Some(msg) = error["message"].as_str() {
        return msg.to_string();
    }
    if let Some(msg) = error.as_str() {
        return match value["error_description"].as_str() {
            Some(desc) => format!("{msg}: {desc}"),
            None => msg.to_string(),
        };
    }
    body.trim().to_string()
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
