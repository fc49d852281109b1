//! Transport boundary: what the client hands to the host's HTTP stack and
//! what it expects back.
//!
//! # Design
//! The core never opens a socket. A `Transport` implementation owned by the
//! host executes each call; the core only prepares URL, headers and body and
//! normalizes the outcome. Verb-specific methods mirror the usual HTTP client
//! contracts: GET carries no body, POST/PUT carry one, and DELETE carries its
//! optional payload inside `DeleteOptions::data` next to the headers.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::headers::HeaderBundle;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request configuration for DELETE: headers plus an optional payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteOptions {
    #[serde(flatten)]
    pub config: HeaderBundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A successful HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    /// Parsed body. `Value::Null` for an empty body, `Value::String` for a
    /// body that is not JSON.
    pub data: Value,
}

/// Host-provided HTTP capability.
///
/// Implementations decide which statuses count as failure; the usual policy
/// is to return `TransportError::Status` for anything outside 2xx.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, config: &HeaderBundle) -> Result<HttpResponse, TransportError>;

    async fn post(&self, url: &str, body: &Value, config: &HeaderBundle) -> Result<HttpResponse, TransportError>;

    async fn put(&self, url: &str, body: &Value, config: &HeaderBundle) -> Result<HttpResponse, TransportError>;

    async fn delete(&self, url: &str, options: &DeleteOptions) -> Result<HttpResponse, TransportError>;
}
