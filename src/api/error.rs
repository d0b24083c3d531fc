use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code carried by a GraphQL error envelope.
///
/// Servers report symbolic codes (`"UNAUTHENTICATED"`) in `extensions.code`;
/// when none is given the envelope falls back to a numeric HTTP-style code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Numeric(i64),
    Code(String),
}

impl StatusCode {
    pub const UNAUTHENTICATED: &'static str = "UNAUTHENTICATED";
    pub const INTERNAL_SERVER_ERROR: &'static str = "INTERNAL_SERVER_ERROR";

    pub fn code(code: impl Into<String>) -> Self {
        StatusCode::Code(code.into())
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, StatusCode::Code(c) if c == Self::UNAUTHENTICATED)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Numeric(n) => write!(f, "{}", n),
            StatusCode::Code(c) => f.write_str(c),
        }
    }
}

/// Normalized GraphQL error envelope: `{message, statusCode}`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} ({status_code})")]
pub struct GraphQLError {
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: StatusCode,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }

    /// Envelope used when there is no usable response body.
    pub fn unknown() -> Self {
        Self::new(
            "Unknown error",
            StatusCode::code(StatusCode::INTERNAL_SERVER_ERROR),
        )
    }
}

/// Failure of a data-provider call.
#[derive(Debug, Error)]
pub enum DataError {
    #[error(transparent)]
    GraphQL(#[from] GraphQLError),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl DataError {
    pub fn message(&self) -> Option<String> {
        match self {
            DataError::GraphQL(e) => Some(e.message.clone()),
            DataError::Decode(_) => Some(self.to_string()),
        }
    }

    /// Error class name. GraphQL envelopes are plain data and carry none.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            DataError::GraphQL(_) => None,
            DataError::Decode(_) => Some("DecodeError"),
        }
    }

    pub fn status_code(&self) -> Option<&StatusCode> {
        match self {
            DataError::GraphQL(e) => Some(&e.status_code),
            DataError::Decode(_) => None,
        }
    }
}

/// Error report handed to the session provider's error hook.
///
/// Every field is optional: callers may forward partial reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<StatusCode>,
}

impl HttpError {
    pub fn is_unauthenticated(&self) -> bool {
        self.status_code
            .as_ref()
            .is_some_and(StatusCode::is_unauthenticated)
    }
}

impl From<GraphQLError> for HttpError {
    fn from(e: GraphQLError) -> Self {
        HttpError {
            message: Some(e.message),
            name: None,
            status_code: Some(e.status_code),
        }
    }
}

impl From<&DataError> for HttpError {
    fn from(e: &DataError) -> Self {
        match e {
            DataError::GraphQL(envelope) => envelope.clone().into(),
            DataError::Decode(_) => HttpError {
                message: e.message(),
                name: e.name().map(str::to_string),
                status_code: None,
            },
        }
    }
}
