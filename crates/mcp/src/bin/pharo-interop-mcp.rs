// Standalone MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use pharo_interop_mcp::server::McpServer;
use pharo_interop_mcp::tools::{register_interop_tools, ToolRegistry};
use pharo_interop_sdk::config::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT, PORT_ENV_VAR};
use pharo_interop_sdk::PharoClient;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "pharo-interop-mcp")]
#[command(about = "MCP server for a running Pharo image (PharoSmalltalkInteropServer)", long_about = None)]
struct Args {
    /// Port of the image server
    #[arg(short, long, env = PORT_ENV_VAR, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host of the image server
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

fn build_client(args: &Args) -> Result<PharoClient> {
    PharoClient::builder()
        .host(args.host.clone())
        .port(args.port)
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .with_context(|| format!("failed to build Pharo client for {}:{}", args.host, args.port))
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!(
        host = %args.host,
        port = args.port,
        "Pharo interop MCP server starting"
    );

    let client = build_client(&args)?;

    let mut registry = ToolRegistry::new();
    register_interop_tools(&mut registry, &client);
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
