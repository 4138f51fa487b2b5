//! Transport layer for the Pharo interop SDK.

pub mod http;

pub use http::HttpTransport;

use crate::response::InteropResponse;
use serde_json::Value;
use std::fmt;

/// HTTP methods the image server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One request/response exchange with the image server.
///
/// Implementations never fail: every problem is reported inside the returned
/// [`InteropResponse`].
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, method: HttpMethod, path: &str, body: Option<Value>) -> InteropResponse;
}
