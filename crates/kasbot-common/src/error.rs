//! Error types and utilities for kasbot

use thiserror::Error;

/// Result type alias for kasbot operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Main error type for kasbot operations
#[derive(Error, Debug)]
pub enum BotError {
    /// Upstream data-provider errors (HTTP failure, non-2xx status,
    /// malformed or missing JSON fields, non-finite numeric values)
    #[error("upstream request to {endpoint} failed: {detail}")]
    Upstream {
        endpoint: String,
        status: Option<u16>,
        detail: String,
    },

    /// Validation errors for user-supplied input
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Configuration related errors
    #[error("configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BotError {
    /// Create an upstream error without an HTTP status
    pub fn upstream(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Upstream {
            endpoint: endpoint.into(),
            status: None,
            detail: detail.into(),
        }
    }

    /// Create an upstream error carrying the HTTP status code
    pub fn upstream_with_status(
        endpoint: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            endpoint: endpoint.into(),
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The HTTP status attached to an upstream error, if any
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

/// Convert transport-level reqwest failures into upstream errors.
///
/// The originating endpoint is unknown at this layer; provider code that has
/// the endpoint in hand should prefer the `upstream*` constructors.
impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        if err.is_timeout() {
            Self::upstream(endpoint, format!("request timeout: {err}"))
        } else if err.is_connect() {
            Self::upstream(endpoint, format!("connection failed: {err}"))
        } else if let Some(status) = err.status() {
            Self::upstream_with_status(endpoint, status.as_u16(), err.to_string())
        } else {
            Self::upstream(endpoint, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_upstream_error_display() {
        let error = BotError::upstream("info/price", "missing field `price`");
        assert_eq!(
            error.to_string(),
            "upstream request to info/price failed: missing field `price`"
        );
        assert_eq!(error.upstream_status(), None);
    }

    #[test]
    fn test_upstream_error_with_status() {
        let error = BotError::upstream_with_status("info/hashrate", 503, "service unavailable");
        assert!(error.to_string().contains("info/hashrate"));
        assert_eq!(error.upstream_status(), Some(503));
    }

    #[test]
    fn test_validation_error() {
        let error = BotError::validation("address must not be empty");
        assert!(error.to_string().contains("validation error"));
        assert!(error.to_string().contains("address must not be empty"));
    }

    #[test]
    fn test_config_error_with_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no config file");
        let error = BotError::config_with_source("failed to read configuration", io_error);
        assert!(error.to_string().contains("configuration error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: BotError = parse_error.into();
        assert!(error.to_string().contains("serialization error"));
    }

    #[test]
    fn test_status_absent_on_other_variants() {
        assert_eq!(BotError::validation("x").upstream_status(), None);
        assert_eq!(BotError::config("x").upstream_status(), None);
    }
}
