//! MCP server exposing a running Pharo image as tools.
//!
//! Each tool forwards to one PharoSmalltalkInteropServer endpoint through
//! [`pharo_interop_sdk::PharoClient`] and answers the image's
//! `{success, result | error}` envelope as its result.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
