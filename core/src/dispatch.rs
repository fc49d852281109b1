//! Target resolution, transport dispatch and response normalization.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::headers::HeaderBundle;
use crate::http::{DeleteOptions, HttpMethod, HttpResponse, Transport};
use crate::placeholders::is_url;
use crate::resources::ResolvedResources;
use crate::types::{is_truthy, ResponseEnvelope};

/// Hook run on every failed call, before the error lands in the envelope.
pub type ErrorInterceptor = Arc<dyn Fn(&TransportError) + Send + Sync>;

/// A fully built call, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub config: HeaderBundle,
    pub body: Option<Value>,
}

/// Resolve a resource name (or literal absolute URL) plus optional path
/// suffix into the final URL.
///
/// Unknown names resolve to the empty string rather than failing; the
/// transport then rejects the call.
pub fn resolve_target(resources: &ResolvedResources, resource: Option<&str>, path: Option<&str>) -> String {
    let base = match resource {
        Some(resource) if is_url(resource) => resource.to_string(),
        Some(resource) => resources.get(resource).cloned().unwrap_or_default(),
        None => String::new(),
    };
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{base}{path}"),
        None => base,
    }
}

/// The body a verb actually sends. POST and PUT default to `{}`, GET never
/// sends one, DELETE forwards a truthy body.
pub fn prepare_body(method: HttpMethod, body: Option<Value>) -> Option<Value> {
    let body = body.filter(is_truthy);
    match method {
        HttpMethod::Get => None,
        HttpMethod::Post | HttpMethod::Put => Some(body.unwrap_or_else(|| json!({}))),
        HttpMethod::Delete => body,
    }
}

// DELETE payloads travel as the request's `data`; a body that already wraps
// its payload in `data` is unwrapped first.
fn delete_payload(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(is_truthy) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

async fn send<T: Transport + ?Sized>(transport: &T, request: PreparedRequest) -> Result<HttpResponse, TransportError> {
    let PreparedRequest {
        method,
        url,
        config,
        body,
    } = request;
    match method {
        HttpMethod::Get => transport.get(&url, &config).await,
        HttpMethod::Post => {
            let body = body.unwrap_or_else(|| json!({}));
            transport.post(&url, &body, &config).await
        }
        HttpMethod::Put => {
            let body = body.unwrap_or_else(|| json!({}));
            transport.put(&url, &body, &config).await
        }
        HttpMethod::Delete => {
            let options = DeleteOptions {
                config,
                data: body.map(delete_payload),
            };
            transport.delete(&url, &options).await
        }
    }
}

/// Map a successful transport response to the envelope's `data`.
///
/// A falsy body yields `None`. In full-response mode the body is nested under
/// `data` next to status and headers; otherwise an object body carrying a
/// truthy `data` member is unwrapped to that member.
pub fn normalize_response(response: HttpResponse, full_response: bool) -> Option<Value> {
    let HttpResponse {
        status,
        status_text,
        headers,
        data,
    } = response;
    if !is_truthy(&data) {
        return None;
    }

    if full_response {
        let headers: Map<String, Value> = headers
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        return Some(json!({
            "status": status,
            "statusText": status_text,
            "headers": headers,
            "data": data,
        }));
    }

    match data {
        Value::Object(mut body) if body.get("data").is_some_and(is_truthy) => body.remove("data"),
        other => Some(other),
    }
}

/// Send `request` through `transport` and normalize the outcome.
///
/// Never fails: transport errors are passed to `interceptor` (if any) and
/// returned in `ResponseEnvelope::error`.
pub async fn execute<T: Transport + ?Sized>(
    transport: &T,
    request: PreparedRequest,
    full_response: bool,
    interceptor: Option<&ErrorInterceptor>,
) -> ResponseEnvelope {
    let method = request.method;
    debug!(%method, url = %request.url, "dispatching request");

    let mut envelope = ResponseEnvelope::default();
    match send(transport, request).await {
        Ok(response) => {
            debug!(%method, status = response.status, "request succeeded");
            envelope.data = normalize_response(response, full_response);
        }
        Err(error) => {
            warn!(%method, %error, "request failed");
            if let Some(interceptor) = interceptor {
                interceptor(&error);
            }
            envelope.error = Some(error);
        }
    }
    envelope
}
