//! Named-resource HTTP client.
//!
//! # Design
//! `ApiClient` owns everything a call needs: the resource registry, auth
//! state and error interceptor (together a `Session`), the token store and
//! the host's `Transport`. Each call is split into `build_request`, which is
//! pure, and `dispatch::execute`, which does the I/O through the transport.
//!
//! The session sits behind `RwLock<Arc<_>>`. `reconfigure` and
//! `update_placeholders` swap it in one assignment under the write lock;
//! calls clone the `Arc` under the read lock and never hold the lock across
//! an await. A call already in flight keeps the session it started with.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, instrument};

use crate::auth::AuthConfig;
use crate::config::ClientConfig;
use crate::dispatch::{self, prepare_body, resolve_target, ErrorInterceptor, PreparedRequest};
use crate::error::TransportError;
use crate::headers::build_headers;
use crate::http::{HttpMethod, Transport};
use crate::placeholders::PlaceholderMap;
use crate::resources::{ResolvedResources, ResourceRegistry};
use crate::store::{NoTokenStore, TokenStore};
use crate::types::{CallOptions, ResponseEnvelope};

#[derive(Clone)]
struct Session {
    registry: ResourceRegistry,
    auth: AuthConfig,
    interceptor: Option<ErrorInterceptor>,
}

impl Session {
    fn from_config(config: ClientConfig, interceptor: Option<ErrorInterceptor>) -> Self {
        let auth = AuthConfig::new(
            config.auth_token.as_deref(),
            config.jwt_token_name.as_deref(),
            Some(config.auth_type.as_str()),
        );
        let registry = ResourceRegistry::new(config.base_url, config.saved_urls, config.placeholders.as_ref());
        Self {
            registry,
            auth,
            interceptor,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("registry", &self.registry)
            .field("auth", &self.auth)
            .field("has_interceptor", &self.interceptor.is_some())
            .finish()
    }
}

pub struct ApiClient<T> {
    transport: T,
    store: Arc<dyn TokenStore>,
    session: RwLock<Arc<Session>>,
}

impl<T: Transport> ApiClient<T> {
    /// Build a client from `config`, resolving every saved URL up front.
    pub fn init(config: ClientConfig, transport: T) -> Self {
        let session = Session::from_config(config, None);
        debug!(
            resources = session.registry.resolved().len(),
            auth_type = %session.auth.auth_type,
            "initialized api client"
        );
        Self {
            transport,
            store: Arc::new(NoTokenStore),
            session: RwLock::new(Arc::new(session)),
        }
    }

    /// Store used to resolve `jwt_token_name` on every call.
    pub fn with_token_store(mut self, store: impl TokenStore + 'static) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Hook invoked with every transport error before it is returned.
    pub fn with_error_interceptor(mut self, interceptor: impl Fn(&TransportError) + Send + Sync + 'static) -> Self {
        let session = self.session.get_mut().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(session).interceptor = Some(Arc::new(interceptor));
        self
    }

    /// Replace resources, auth state and error interceptor wholesale. Passing
    /// `None` leaves the client without an interceptor.
    pub fn reconfigure(&self, config: ClientConfig, interceptor: Option<ErrorInterceptor>) {
        let session = Session::from_config(config, interceptor);
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(session);
        debug!("reconfigured api client");
    }

    /// Re-resolve every saved URL from its original template with new
    /// placeholder values. `None` leaves the resources untouched.
    pub fn update_placeholders(&self, placeholders: Option<&PlaceholderMap>) {
        let Some(placeholders) = placeholders else {
            return;
        };
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        let mut session = Session::clone(&guard);
        session.registry.update_placeholders(placeholders);
        *guard = Arc::new(session);
        debug!(count = placeholders.len(), "updated placeholders");
    }

    /// Snapshot of the currently resolved URLs.
    pub fn resources(&self) -> ResolvedResources {
        self.session().registry.resolved().clone()
    }

    pub fn auth(&self) -> AuthConfig {
        self.session().auth.clone()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn session(&self) -> Arc<Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Resolve URL, headers and body for a call without sending it.
    pub fn build_request(&self, method: HttpMethod, saved_url: &str, options: &CallOptions) -> PreparedRequest {
        self.prepare(&self.session(), method, saved_url, options)
    }

    fn prepare(&self, session: &Session, method: HttpMethod, saved_url: &str, options: &CallOptions) -> PreparedRequest {
        let config = build_headers(self.store.as_ref(), &session.auth, options);
        let url = resolve_target(
            session.registry.resolved(),
            Some(saved_url).filter(|s| !s.is_empty()),
            options.path.as_deref(),
        );
        PreparedRequest {
            method,
            url,
            config,
            body: prepare_body(method, options.body.clone()),
        }
    }

    async fn call(&self, method: HttpMethod, saved_url: &str, options: CallOptions) -> ResponseEnvelope {
        let session = self.session();
        let request = self.prepare(&session, method, saved_url, &options);
        dispatch::execute(&self.transport, request, options.full_response, session.interceptor.as_ref()).await
    }

    #[instrument(skip(self, options))]
    pub async fn get(&self, saved_url: &str, options: CallOptions) -> ResponseEnvelope {
        self.call(HttpMethod::Get, saved_url, options).await
    }

    /// POST; sends `{}` when `options` carries no body.
    #[instrument(skip(self, options))]
    pub async fn post(&self, saved_url: &str, options: CallOptions) -> ResponseEnvelope {
        self.call(HttpMethod::Post, saved_url, options).await
    }

    /// PUT; sends `{}` when `options` carries no body.
    #[instrument(skip(self, options))]
    pub async fn put(&self, saved_url: &str, options: CallOptions) -> ResponseEnvelope {
        self.call(HttpMethod::Put, saved_url, options).await
    }

    #[instrument(skip(self, options))]
    pub async fn delete(&self, saved_url: &str, options: CallOptions) -> ResponseEnvelope {
        self.call(HttpMethod::Delete, saved_url, options).await
    }
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("store", &self.store)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
