//! Per-call options and the uniform response envelope.
//!
//! # Design
//! `CallOptions` deserializes from the same camelCase shape the JSON-facing
//! callers use and is forgiving about it: non-string `responseType`, null
//! flags and malformed header entries degrade to "absent" instead of failing.
//! Rust callers build it with the chained setters.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::TransportError;
use crate::headers::{deserialize_custom_headers, CustomHeader};

/// Options for a single verb call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallOptions {
    pub body: Option<Value>,
    /// Query parameters; only a JSON object is forwarded.
    pub params: Option<Value>,
    /// Override for the whole `authorization` header value.
    pub auth: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub disable_auth: bool,
    /// Suffix appended verbatim to the resolved resource URL.
    pub path: Option<String>,
    #[serde(deserialize_with = "deserialize_custom_headers")]
    pub custom_headers: Vec<CustomHeader>,
    #[serde(deserialize_with = "lenient_string")]
    pub response_type: Option<String>,
    #[serde(deserialize_with = "lenient_flag")]
    pub full_response: bool,
}

impl CallOptions {
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }

    pub fn disable_auth(mut self, disable: bool) -> Self {
        self.disable_auth = disable;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn header(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_header(CustomHeader::new(key, value))
    }

    pub fn custom_header(mut self, header: CustomHeader) -> Self {
        self.custom_headers.push(header);
        self
    }

    pub fn response_type(mut self, response_type: impl Into<String>) -> Self {
        self.response_type = Some(response_type.into());
        self
    }

    pub fn full_response(mut self, full: bool) -> Self {
        self.full_response = full;
        self
    }
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.is_some_and(|v| is_truthy(&v)))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// JSON truthiness: null, false, 0 and "" are falsy, everything else truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Outcome of a verb call. After a completed call at most one side is set;
/// callers check `error` before trusting `data`.
#[derive(Debug, Default)]
pub struct ResponseEnvelope {
    pub data: Option<Value>,
    pub error: Option<TransportError>,
}

impl ResponseEnvelope {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Option<Value>, TransportError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}
