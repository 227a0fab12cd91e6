//! Basic logger usage example
//!
//! Demonstrates named loggers sharing one policy, per-name thresholds and
//! runtime threshold changes.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{debug, info, warning};

fn main() -> Result<()> {
    println!("=== Leveled Logger - Basic Usage Example ===\n");

    let policy = LevelPolicy::builder()
        .default_threshold(LogLevel::Debug)
        .threshold("net", LogLevel::Warning)
        .build();

    let app = policy.logger("");
    let net = policy.logger("net");

    println!("1. Logging at different levels (default threshold DEBUG):");
    app.verbose("This is a verbose message (hidden)");
    debug!(app, "x={}", 5);
    info!(app, "Started {} workers", 4);
    app.error("This is an error message");

    println!("\n2. The 'net' logger only shows WARNING and above:");
    info!(net, "Connecting to {}", "10.0.0.1:443");
    warning!(net, "Retry attempt {} of {}", 3, 5);

    println!("\n3. Lowering the threshold at runtime:");
    policy.apply_directives("verbose,net=info")?;
    app.verbose("Verbose message (now visible)");
    info!(net, "Connected");

    println!("\n4. Bare output without metadata:");
    policy.set_format_flags(FormatFlags::none());
    app.info("Just the tag and the message");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
