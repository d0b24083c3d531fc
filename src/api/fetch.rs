//! Authenticated fetch wrapper.
//!
//! Every request goes out with the session bearer token, a JSON content type
//! and the `Apollo-Require-Preflight` header. The response body is parsed once
//! and inspected for a GraphQL `errors` member; any error found is returned as
//! a [`GraphQLError`] even when the HTTP exchange itself succeeded.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::{PreparedRequest, Transport};
use super::error::{GraphQLError, StatusCode};
use crate::session::SessionStore;

const APOLLO_REQUIRE_PREFLIGHT: &str = "apollo-require-preflight";

/// Caller-supplied request options.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::POST,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    /// POST with a JSON-serialized body.
    pub fn post_json(body: &impl serde::Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self {
            body: Some(serde_json::to_vec(body)?),
            ..Self::default()
        })
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Response handed back to the caller after error inspection.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
    parsed: Option<Value>,
}

impl FetchResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.parsed {
            Some(value) => T::deserialize(value),
            None => serde_json::from_slice(&self.body),
        }
    }
}

pub struct FetchWrapper {
    store: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl FetchWrapper {
    pub fn new(store: Arc<dyn SessionStore>, transport: Arc<dyn Transport>) -> Self {
        Self { store, transport }
    }

    pub fn fetch(&self, url: &str, options: RequestOptions) -> Result<FetchResponse, GraphQLError> {
        let request = PreparedRequest {
            method: options.method,
            headers: self.augment_headers(options.headers),
            body: options.body,
        };

        let raw = self.transport.send(url, request).map_err(|e| {
            debug!("  transport failure: {}", e);
            GraphQLError::unknown()
        })?;

        let parsed = serde_json::from_slice::<Value>(&raw.body).ok();
        if parsed.is_none() {
            debug!("  response body is not JSON ({} bytes)", raw.body.len());
        }

        if let Some(error) = extract_graphql_error(parsed.as_ref()) {
            debug!("  graphql error: {}", error);
            return Err(error);
        }

        Ok(FetchResponse {
            status: raw.status,
            body: raw.body,
            parsed,
        })
    }

    fn augment_headers(&self, mut headers: HeaderMap) -> HeaderMap {
        if !headers.contains_key(AUTHORIZATION) {
            match self.store.get() {
                Ok(Some(token)) => match HeaderValue::from_str(&format!("Bearer {}", token)) {
                    Ok(mut value) => {
                        value.set_sensitive(true);
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(_) => warn!("Stored session token is not a valid header value, ignoring it"),
                },
                Ok(None) => debug!("  no session token, sending no Authorization header"),
                Err(e) => warn!("Could not read session token: {}", e),
            }
        }

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static(APOLLO_REQUIRE_PREFLIGHT),
            HeaderValue::from_static("true"),
        );
        headers
    }
}

/// JavaScript-style truthiness of a JSON value.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn message_text(error: &Value) -> String {
    match error.get("message") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn status_from_code(code: &Value) -> StatusCode {
    match code {
        Value::String(s) => StatusCode::Code(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => StatusCode::Numeric(i),
            None => StatusCode::Code(n.to_string()),
        },
        other => StatusCode::Code(other.to_string()),
    }
}

/// Derive the error envelope from a parsed response body.
///
/// `None` input means the body was absent or not JSON. Messages of multiple
/// errors are joined with no separator.
pub fn extract_graphql_error(body: Option<&Value>) -> Option<GraphQLError> {
    let body = match body {
        Some(b) if !is_falsy(b) => b,
        _ => return Some(GraphQLError::unknown()),
    };

    let errors = body.as_object()?.get("errors")?;

    if errors.as_array().is_some_and(Vec::is_empty) {
        return None;
    }

    let messages: String = errors
        .as_array()
        .map(|list| list.iter().map(message_text).collect())
        .unwrap_or_default();

    let message = if messages.is_empty() {
        errors.to_string()
    } else {
        messages
    };

    let status_code = errors
        .get(0)
        .and_then(|first| first.pointer("/extensions/code"))
        .filter(|code| !is_falsy(code))
        .map(status_from_code)
        .unwrap_or(StatusCode::Numeric(500));

    Some(GraphQLError::new(message, status_code))
}
