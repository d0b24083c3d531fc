//! Scripted transport for unit tests.

use std::sync::Mutex;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

use super::client::{PreparedRequest, RawResponse, Transport, TransportError};

type Handler = Box<dyn Fn(&RecordedRequest) -> Result<RawResponse, TransportError> + Send + Sync>;

/// A request as seen by the transport, with the body decoded as JSON.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    pub fn query(&self) -> &str {
        self.body["query"].as_str().unwrap_or_default()
    }
}

/// Records every request and answers with a caller-supplied handler.
pub(crate) struct RecordingTransport {
    handler: Handler,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Result<RawResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer 200 with `body`.
    pub fn ok(body: Value) -> Self {
        Self::with_handler(move |_| Ok(json_response(200, &body)))
    }

    /// Always answer with raw bytes.
    pub fn raw(status: u16, body: &'static str) -> Self {
        Self::with_handler(move |_| {
            Ok(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            })
        })
    }

    /// Every call fails at the network level.
    pub fn unreachable() -> Self {
        Self::with_handler(|_| Err(TransportError::Network("connection refused".to_string())))
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for RecordingTransport {
    fn send(&self, url: &str, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let body = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
            .unwrap_or(Value::Null);
        let recorded = RecordedRequest {
            url: url.to_string(),
            method: request.method,
            headers: request.headers,
            body,
        };
        let response = (self.handler)(&recorded);
        self.requests.lock().unwrap().push(recorded);
        response
    }
}

pub(crate) fn json_response(status: u16, body: &Value) -> RawResponse {
    RawResponse {
        status,
        body: serde_json::to_vec(body).unwrap(),
    }
}
