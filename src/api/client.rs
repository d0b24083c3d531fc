use std::time::Instant;

use log::debug;
use reqwest::Method;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Safely slice a string at UTF-8 character boundaries.
/// Returns a substring from `start` to `end` byte positions, adjusted to valid char boundaries.
fn safe_slice(s: &str, start: usize, end: usize) -> &str {
    let mut start = start.min(s.len());
    while !s.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = end.min(s.len()).max(start);
    while !s.is_char_boundary(end) {
        end += 1;
    }
    &s[start..end]
}

/// Truncate a string for log output, appending "..." if truncated.
pub(crate) fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", safe_slice(s, 0, max_len))
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// A fully-assembled outgoing request.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status and body bytes of a completed call. The body is read exactly once.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs one HTTP exchange.
pub trait Transport: Send + Sync {
    fn send(&self, url: &str, request: PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, url: &str, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let body_len = request.body.as_ref().map_or(0, Vec::len);
        debug!("{} {} (body: {} bytes)", request.method, url, body_len);
        if let Some(body) = &request.body {
            debug!(
                "  request body: {}",
                truncate_for_log(&String::from_utf8_lossy(body), 200)
            );
        }

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let start = Instant::now();
        let response = builder.send().map_err(|e| {
            debug!("  network error after {:?}: {}", start.elapsed(), e);
            TransportError::Network(e.to_string())
        })?;

        let status = response.status();
        debug!("  response: {} in {:?}", status, start.elapsed());

        let body = response
            .bytes()
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_vec();
        debug!("  response body: {} bytes", body.len());
        debug!(
            "  response preview: {}",
            truncate_for_log(&String::from_utf8_lossy(&body), 200)
        );

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
