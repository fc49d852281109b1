//! Client configuration.
//!
//! Field names follow the camelCase option names of JSON config files
//! (`baseUrl`, `savedUrls`, `jwtTokenName`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::placeholders::PlaceholderMap;

fn default_auth_type() -> String {
    "bearer".to_string()
}

// `null` or a non-string auth type falls back to the default scheme.
fn lenient_auth_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(auth_type)) => auth_type,
        _ => default_auth_type(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    /// Resource name → path template (relative to `base_url`) or absolute URL.
    #[serde(default)]
    pub saved_urls: BTreeMap<String, String>,
    /// Name looked up in the token store to find the auth token.
    #[serde(default)]
    pub jwt_token_name: Option<String>,
    #[serde(default = "default_auth_type", deserialize_with = "lenient_auth_type")]
    pub auth_type: String,
    /// Literal token; takes precedence over `jwt_token_name`.
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub placeholders: Option<PlaceholderMap>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            saved_urls: BTreeMap::new(),
            jwt_token_name: None,
            auth_type: default_auth_type(),
            auth_token: None,
            placeholders: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn saved_url(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.saved_urls.insert(name.into(), template.into());
        self
    }

    pub fn placeholder(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders
            .get_or_insert_with(PlaceholderMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn jwt_token_name(mut self, name: impl Into<String>) -> Self {
        self.jwt_token_name = Some(name.into());
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn auth_type(mut self, auth_type: impl Into<String>) -> Self {
        self.auth_type = auth_type.into();
        self
    }
}
