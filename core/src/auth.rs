//! Authorization scheme selection and token sources.

use std::fmt;

/// Scheme family used to build the `authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    /// `Bearer <token>`.
    #[default]
    Bearer,
    /// The raw token, no prefix.
    ApiKey,
}

impl AuthType {
    /// Parse an auth-type identifier. Unknown identifiers fall back to `Bearer`.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("apikey") => AuthType::ApiKey,
            _ => AuthType::Bearer,
        }
    }

    pub fn scheme(self) -> &'static str {
        match self {
            AuthType::Bearer => "Bearer",
            AuthType::ApiKey => "",
        }
    }

    /// Header value for `token` under this scheme. An empty scheme yields the
    /// bare token without a leading space.
    pub fn authorization(self, token: &str) -> String {
        format!("{} {token}", self.scheme()).trim().to_string()
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Bearer => write!(f, "bearer"),
            AuthType::ApiKey => write!(f, "apikey"),
        }
    }
}

/// Scheme prefix for an auth-type identifier: `"bearer"` → `"Bearer"`,
/// `"apikey"` → `""`, anything else → `"Bearer"`.
pub fn scheme_for(auth_type: Option<&str>) -> &'static str {
    AuthType::parse(auth_type).scheme()
}

/// Where the client's token comes from.
#[derive(Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// A token value given directly at configuration time.
    Explicit(String),
    /// A name looked up in the `TokenStore` on every call; the name itself
    /// is used as the token when the store has no value for it.
    Lookup(String),
}

// Token values stay out of logs.
impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Explicit(_) => write!(f, "Explicit(..)"),
            TokenSource::Lookup(name) => f.debug_tuple("Lookup").field(name).finish(),
        }
    }
}

/// Authentication state shared by every call of a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    pub token: Option<TokenSource>,
    pub auth_type: AuthType,
}

impl AuthConfig {
    /// Build the auth state from configuration. An explicit token always wins
    /// over a lookup name; empty strings count as absent.
    pub fn new(auth_token: Option<&str>, token_name: Option<&str>, auth_type: Option<&str>) -> Self {
        let token = match (non_empty(auth_token), non_empty(token_name)) {
            (Some(token), _) => Some(TokenSource::Explicit(token.to_string())),
            (None, Some(name)) => Some(TokenSource::Lookup(name.to_string())),
            (None, None) => None,
        };
        Self {
            token,
            auth_type: AuthType::parse(auth_type),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
