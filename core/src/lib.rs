//! Named-resource HTTP client core.
//!
//! # Overview
//! Registers logical resource names against URL templates, fills `:name`
//! placeholders, attaches authorization and custom headers, and normalizes
//! every call into a `ResponseEnvelope { data, error }`. The HTTP round-trip
//! itself is delegated to a host-provided `Transport`, and token lookup to a
//! host-provided `TokenStore`.
//!
//! # Design
//! - `ApiClient` replaces process-wide state: configure once with
//!   `ApiClient::init`, call many times.
//! - Each call is `build_request` (pure) followed by `dispatch::execute`
//!   (transport I/O + normalization), so the I/O boundary stays explicit.
//! - Verb calls never fail: transport errors are data in the envelope.
//! - Bad input (unknown resource, malformed headers, non-object params)
//!   degrades to empty or omitted values instead of erroring.

pub mod auth;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod headers;
pub mod http;
pub mod placeholders;
pub mod resources;
pub mod store;
pub mod types;

pub use auth::{scheme_for, AuthConfig, AuthType, TokenSource};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use dispatch::{ErrorInterceptor, PreparedRequest};
pub use error::{ConfigError, TransportError};
pub use headers::{CustomHeader, HeaderBundle};
pub use http::{DeleteOptions, HttpMethod, HttpResponse, Transport};
pub use placeholders::{is_url, replace_placeholders, PlaceholderMap};
pub use resources::{prepare_resources, ResolvedResources, ResourceRegistry};
pub use store::{MemoryTokenStore, NoTokenStore, TokenStore};
pub use types::{CallOptions, ResponseEnvelope};
