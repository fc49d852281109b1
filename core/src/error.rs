//! Error types for the resource client.
//!
//! # Design
//! Transport failures are data: they travel inside `ResponseEnvelope::error`
//! instead of being returned as `Err`, so every verb call resolves. The only
//! fallible public path is loading a `ClientConfig` from JSON.

use serde_json::Value;
use thiserror::Error;

/// Failure reported by a `Transport` for a single request.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response (DNS, connect, reset...).
    #[error("{0}")]
    Network(String),

    /// The server answered with a status the transport treats as failure.
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        status_text: String,
        /// Parsed response body, `Value::Null` when empty.
        data: Value,
    },

    /// The request or response payload could not be (de)serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Any other transport-side failure, e.g. a response body that could
    /// not be read.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Human-readable message, the same text `Display` produces.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for `Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client configuration: {0}")]
    Json(#[from] serde_json::Error),
}
