//! Main client for the Pharo interop SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
use crate::error::PharoResult;
use crate::response::InteropResponse;
use crate::transport::{HttpMethod, HttpTransport, Transport};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Main client for interacting with a PharoSmalltalkInteropServer.
///
/// Cheap to clone; clones share one transport.
#[derive(Clone)]
pub struct PharoClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for PharoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PharoClient").finish_non_exhaustive()
    }
}

impl PharoClient {
    /// Create a new client builder.
    pub fn builder() -> PharoClientBuilder {
        PharoClientBuilder::new()
    }

    /// Client for localhost, port from `PHARO_SIS_PORT` (default 8086).
    pub fn from_env() -> PharoResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> PharoResult<Self> {
        let http = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(http)))
    }

    /// Create a client on top of any transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Get the code evaluation API.
    pub fn code(&self) -> CodeApi<'_> {
        CodeApi::new(self)
    }

    /// Get the classes API.
    pub fn classes(&self) -> ClassesApi<'_> {
        ClassesApi::new(self)
    }

    /// Get the packages API.
    pub fn packages(&self) -> PackagesApi<'_> {
        PackagesApi::new(self)
    }

    /// Get the search API.
    pub fn search(&self) -> SearchApi<'_> {
        SearchApi::new(self)
    }

    /// Get the test runner API.
    pub fn tests(&self) -> TestsApi<'_> {
        TestsApi::new(self)
    }

    /// Get the projects API.
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    /// Get the screen API.
    pub fn screen(&self) -> ScreenApi<'_> {
        ScreenApi::new(self)
    }

    /// Get the settings API.
    pub fn settings(&self) -> SettingsApi<'_> {
        SettingsApi::new(self)
    }

    /// Issue a GET with `args` as query parameters.
    pub(crate) async fn get<A: Serialize>(&self, path: &str, args: &A) -> InteropResponse {
        self.send(HttpMethod::Get, path, args).await
    }

    /// Issue a GET without arguments.
    pub(crate) async fn get_plain(&self, path: &str) -> InteropResponse {
        self.transport.call(HttpMethod::Get, path, None).await
    }

    /// Issue a POST with `args` as the JSON body.
    pub(crate) async fn post<A: Serialize>(&self, path: &str, args: &A) -> InteropResponse {
        self.send(HttpMethod::Post, path, args).await
    }

    async fn send<A: Serialize>(&self, method: HttpMethod, path: &str, args: &A) -> InteropResponse {
        match serde_json::to_value(args) {
            Ok(body) => self.transport.call(method, path, Some(body)).await,
            Err(e) => {
                warn!(method = %method, path = path, error = %e, "Could not encode request arguments");
                InteropResponse::failure(format!("invalid request arguments: {}", e))
            }
        }
    }
}

/// Builder for creating a PharoClient.
pub struct PharoClientBuilder {
    host: String,
    port: u16,
    timeout: Duration,
}

impl PharoClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the host of the image server.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port of the image server.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configuration this builder would produce.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            port: self.port,
            timeout: self.timeout,
        }
    }

    /// Build the client.
    pub fn build(self) -> PharoResult<PharoClient> {
        PharoClient::from_config(self.config())
    }
}

impl Default for PharoClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
