//! Per-call header, query-param and response-type assembly.
//!
//! # Design
//! Bad input never fails a call here. Custom header entries without both a
//! key and a value are skipped, non-object params are dropped, and the
//! `authorization` header is simply left out when no usable token exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::auth::{AuthConfig, TokenSource};
use crate::store::TokenStore;
use crate::types::CallOptions;

pub const AUTHORIZATION: &str = "authorization";

/// Everything besides URL and body that the transport needs for one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBundle {
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,
}

impl HeaderBundle {
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION).map(String::as_str)
    }
}

/// One caller-supplied header. Entries missing either half are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomHeader {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl CustomHeader {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    fn pair(&self) -> Option<(&str, &str)> {
        let key = self.key.as_deref().filter(|k| !k.is_empty())?;
        let value = self.value.as_deref().filter(|v| !v.is_empty())?;
        Some((key, value))
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(entry) => Self {
                key: entry.get("key").and_then(scalar_to_string),
                value: entry.get("value").and_then(scalar_to_string),
            },
            _ => Self::default(),
        }
    }
}

/// Lenient list reader: every entry becomes a `CustomHeader`, non-object
/// entries turn into empty ones that contribute nothing.
pub(crate) fn deserialize_custom_headers<'de, D>(deserializer: D) -> Result<Vec<CustomHeader>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(entries)) => entries.iter().map(CustomHeader::from_value).collect(),
        _ => Vec::new(),
    })
}

/// Keeps `params` only when it is a JSON object.
pub(crate) fn object_params(params: Option<&Value>) -> Option<Map<String, Value>> {
    match params {
        Some(Value::Object(map)) => Some(map.clone()),
        _ => None,
    }
}

// Truthy scalars as header text; falsy ones ("", 0, false, null) are absent.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Resolve the client's token. Lookup names fall back to themselves when the
/// store has no value.
pub fn resolve_token(store: &dyn TokenStore, source: Option<&TokenSource>) -> Option<String> {
    match source? {
        TokenSource::Explicit(token) => Some(token.clone()),
        TokenSource::Lookup(name) => Some(
            store
                .get_item(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| name.clone()),
        ),
    }
}

/// Build the header bundle for one call.
pub fn build_headers(store: &dyn TokenStore, auth: &AuthConfig, options: &CallOptions) -> HeaderBundle {
    let mut bundle = HeaderBundle::default();

    if !options.disable_auth {
        let override_token = options.auth.as_deref().filter(|t| !t.is_empty());
        let authorization = match override_token {
            Some(token) => Some(token.to_string()),
            None => resolve_token(store, auth.token.as_ref())
                .filter(|t| !t.is_empty())
                .map(|token| auth.auth_type.authorization(&token)),
        };
        if let Some(value) = authorization {
            bundle.headers.insert(AUTHORIZATION.to_string(), value);
        }
    }

    for (key, value) in options.custom_headers.iter().filter_map(CustomHeader::pair) {
        bundle.headers.insert(key.to_string(), value.to_string());
    }

    bundle.params = object_params(options.params.as_ref());
    bundle.response_type = options.response_type.clone().filter(|r| !r.is_empty());

    trace!(
        header_count = bundle.headers.len(),
        has_auth = bundle.authorization().is_some(),
        has_params = bundle.params.is_some(),
        "built header bundle"
    );
    bundle
}
