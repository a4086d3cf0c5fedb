// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! outbox-remote: WebSocket relay that accepts queued mutations.
//!
//! Every accepted commit is appended to `commits.jsonl` in the data
//! directory before it is acknowledged.

mod server;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// outbox-remote: relay for outbox commits
#[derive(Parser, Debug)]
#[command(name = "outbox-remote")]
#[command(about = "WebSocket relay that records commits from outbox clients")]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0:7890")]
    bind: SocketAddr,

    /// Directory for the commit log
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// Reject commits with this action (repeatable)
    #[arg(long = "reject", value_name = "ACTION")]
    reject: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting outbox-remote");
    info!("  Bind address: {}", args.bind);
    info!("  Data directory: {}", args.data.display());
    if !args.reject.is_empty() {
        info!("  Rejecting actions: {}", args.reject.join(", "));
    }

    let state = state::RelayState::open(&args.data, args.reject)?;
    info!("  Commits recorded: {}", state.commit_count().await);

    server::run(args.bind, state).await?;

    Ok(())
}
