//! # Pharo Interop SDK
//!
//! Rust client for PharoSmalltalkInteropServer, the HTTP API a running Pharo
//! image exposes for evaluating code, browsing classes and running tests.
//!
//! Every call answers an [`InteropResponse`], the server's own
//! `{success, result | error}` envelope. Transport problems (unreachable
//! server, non-2xx status, malformed JSON) are folded into that envelope
//! instead of being raised.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pharo_interop_sdk::{PharoClient, PharoResult};
//!
//! #[tokio::main]
//! async fn main() -> PharoResult<()> {
//!     // Port from PHARO_SIS_PORT, default 8086
//!     let client = PharoClient::from_env()?;
//!
//!     let response = client.code().eval("3 + 4").await;
//!     if let Some(result) = response.result() {
//!         println!("3 + 4 = {}", result);
//!     }
//!
//!     let packages = client.packages().list().await;
//!     println!("{}", packages.to_value());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod transport;

// Re-export main client
pub use client::{PharoClient, PharoClientBuilder};
pub use config::{ClientConfig, DEFAULT_PORT, PORT_ENV_VAR};
pub use error::{FailureKind, PharoError, PharoResult, TransportFailure};
pub use response::{ErrorReceiver, InteropResponse, RemoteError, StructuredError};
pub use transport::{HttpMethod, HttpTransport, Transport};
