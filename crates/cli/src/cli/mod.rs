// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::colors;
use clap::{Parser, Subcommand, ValueEnum};
use outbox_core::ItemState;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn parse_state(s: &str) -> Result<ItemState, String> {
    s.parse().map_err(|e: outbox_core::Error| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "outbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline mutation queue: record changes now, commit them when the relay is reachable")]
#[command(styles = colors::styles())]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a .outbox directory here
    #[command(after_help = "\
Examples:
  outbox init                              Local queue only
  outbox init --remote ws://localhost:7890 Queue and sync with a relay")]
    Init {
        /// Directory to initialize (default: current directory)
        path: Option<String>,

        /// Relay URL (ws:// or wss://)
        #[arg(long, value_name = "url")]
        remote: Option<String>,
    },

    /// Queue a mutation
    #[command(after_help = "\
Examples:
  outbox enqueue create_post '{\"title\":\"hi\"}'
  outbox enqueue logout --no-sync")]
    Enqueue {
        /// Action name
        #[arg(value_parser = non_empty_string)]
        action: String,

        /// Payload as a JSON value (default: null)
        payload: Option<String>,

        /// Only queue; do not try to sync afterwards
        #[arg(long)]
        no_sync: bool,
    },

    /// Show queue counts and relay reachability
    Status {
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// List queued items in enqueue order
    List {
        /// Only items in this state (pending, syncing, synced, failed)
        #[arg(short, long, value_parser = parse_state)]
        state: Option<ItemState>,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Commit outstanding items now if the relay is reachable
    Sync,

    /// Remove synced items from the queue
    Purge,

    /// Keep syncing on reconnect until interrupted
    Watch,
}
