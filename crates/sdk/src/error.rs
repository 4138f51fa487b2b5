//! Error types for the Pharo interop SDK.

use crate::response::{InteropResponse, RemoteError};
use serde_json::Value;
use std::error::Error as StdError;

/// Result type for SDK setup operations.
pub type PharoResult<T> = Result<T, PharoError>;

/// Errors raised while configuring or building a client.
///
/// Request-time failures never surface as `PharoError`; they are folded into
/// an [`InteropResponse`] through [`TransportFailure`].
#[derive(Debug, thiserror::Error)]
pub enum PharoError {
    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// The three ways a single round trip to the image server can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    /// The server could not be reached, timed out, or dropped the body.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered with a non-2xx status.
    #[error("{}", status_message(.status, .body))]
    HttpStatus { status: u16, body: String },

    /// A 2xx body that is not JSON.
    #[error("invalid JSON response: {0}")]
    InvalidJson(String),
}

/// Coarse classification of a [`TransportFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Connection,
    HttpStatus,
    InvalidJson,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::HttpStatus => "http_status",
            Self::InvalidJson => "invalid_json",
        }
    }
}

impl TransportFailure {
    /// Build a connection failure, keeping the whole source chain in the detail.
    pub fn connection(err: &(dyn StdError + 'static)) -> Self {
        Self::Connection(describe_chain(err))
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Connection(_) => FailureKind::Connection,
            Self::HttpStatus { .. } => FailureKind::HttpStatus,
            Self::InvalidJson(_) => FailureKind::InvalidJson,
        }
    }

    /// Normalize into the `{success: false, error}` shape.
    ///
    /// For non-2xx statuses the server's own body wins when it is a JSON object
    /// carrying an `error` field; it is forwarded with every field intact.
    pub fn into_response(self) -> InteropResponse {
        if let Self::HttpStatus { body, .. } = &self {
            if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
                if fields.contains_key("error") {
                    return InteropResponse::from_error_body(fields);
                }
            }
        }
        InteropResponse::failure(RemoteError::Message(self.to_string()))
    }
}

impl From<TransportFailure> for InteropResponse {
    fn from(failure: TransportFailure) -> Self {
        failure.into_response()
    }
}

fn status_message(status: &u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP error {}", status)
    } else {
        format!("HTTP error {}: {}", status, body)
    }
}

fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
