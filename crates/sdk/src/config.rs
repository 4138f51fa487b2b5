//! Configuration types for the Pharo interop SDK.

use crate::error::{PharoError, PharoResult};
use std::time::Duration;
use url::Url;

/// Environment variable selecting the image server port.
pub const PORT_ENV_VAR: &str = "PHARO_SIS_PORT";

/// Port PharoSmalltalkInteropServer listens on by default.
pub const DEFAULT_PORT: u16 = 8086;

pub const DEFAULT_HOST: &str = "localhost";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Pharo client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Host the image server runs on.
    pub host: String,
    /// Port the image server listens on.
    pub port: u16,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Localhost, with the port taken from `PHARO_SIS_PORT` when set.
    pub fn from_env() -> PharoResult<Self> {
        let port = port_from_env_value(std::env::var(PORT_ENV_VAR).ok().as_deref())?;
        Ok(Self::new(DEFAULT_HOST, port))
    }

    /// Base URL of the image server, e.g. `http://localhost:8086/`.
    pub fn base_url(&self) -> PharoResult<Url> {
        Ok(Url::parse(&format!("http://{}:{}/", self.host, self.port))?)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

/// Resolve the port from the raw value of `PHARO_SIS_PORT`.
pub fn port_from_env_value(value: Option<&str>) -> PharoResult<u16> {
    match value.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(raw) => raw.parse().map_err(|_| {
            PharoError::Config(format!("{} must be a port number, got {:?}", PORT_ENV_VAR, raw))
        }),
    }
}
