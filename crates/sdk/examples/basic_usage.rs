//! Basic SDK usage example.
//!
//! Connects to a running PharoSmalltalkInteropServer, evaluates an expression
//! and browses a few classes.
//!
//! Run with: cargo run --example basic_usage

use pharo_interop_sdk::{PharoClient, PharoResult, RemoteError};
use std::time::Duration;

#[tokio::main]
async fn main() -> PharoResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let client = PharoClient::builder()
        .port(8086)
        .timeout(Duration::from_secs(10))
        .build()?;

    println!("Evaluating 3 + 4...");
    match client.code().eval("3 + 4").await.into_result() {
        Ok(result) => println!("  => {}", result),
        Err(error) => println!("  failed: {}", error.summary()),
    }

    // Errors raised inside the image come back structured on newer servers
    println!("\nEvaluating 1/0...");
    match client.code().eval("1/0").await.into_result() {
        Ok(result) => println!("  => {}", result),
        Err(RemoteError::Structured(error)) => {
            println!("  error: {}", error.description().unwrap_or("?"));
            if let Some(receiver) = error.receiver() {
                println!("  receiver class: {:?}", receiver.class);
            }
        }
        Err(error) => println!("  error: {}", error.summary()),
    }

    println!("\nSearching classes like 'OrderedColl'...");
    let classes = client.search().classes_like("OrderedColl").await;
    println!("  {}", classes.to_value());

    println!("\nComment of Object:");
    let comment = client.classes().comment("Object").await;
    if let Some(text) = comment.result().and_then(|value| value.as_str()) {
        println!("{}", text);
    }

    Ok(())
}
