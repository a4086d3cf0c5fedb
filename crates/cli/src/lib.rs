// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! outboxrs - the library behind the `outbox` CLI.
//!
//! Wires the [`outbox_core`] engine to a `.outbox/` project directory: the
//! queue lives in `.outbox/offline_sync_queue.json`, settings in
//! `.outbox/config.toml`, and commits go to an `outbox-remote` relay over
//! WebSocket.
//!
//! # Main Components
//!
//! - [`Config`] - Project configuration (retry limit, relay settings)
//! - [`sync`] - WebSocket committer and TCP reachability probe
//! - [`Error`] - Error types for all operations
//!
//! ```rust,ignore
//! use outboxrs::{init_work_dir, find_work_dir, Config};
//!
//! let work_dir = init_work_dir(Path::new("."), None)?;
//! let config = Config::load(&find_work_dir()?)?;
//! ```

mod cli;
pub mod colors;
mod commands;
mod display;
pub mod env;

pub mod config;
pub mod error;
pub mod sync;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{find_work_dir, init_work_dir, Config, RemoteConfig};
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `OUTBOX_LOG` (or `RUST_LOG`) overrides the default level, which is `info`,
/// or `debug` with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { path, remote } => commands::init::run(path, remote),
        Command::Enqueue {
            action,
            payload,
            no_sync,
        } => commands::enqueue::run(action, payload, no_sync),
        Command::Status { output } => commands::status::run(output),
        Command::List { state, output } => commands::list::run(state, output),
        Command::Sync => commands::sync::run(),
        Command::Purge => commands::purge::run(),
        Command::Watch => commands::watch::run(),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
