// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the outbox CLI.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'outbox init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid payload: {0}\n  hint: the payload must be a JSON value, e.g. '{{\"id\": 1}}'")]
    InvalidPayload(String),

    #[error("invalid remote URL '{0}'\n  hint: use ws://host:port or wss://host:port")]
    InvalidRemoteUrl(String),

    #[error("no remote configured\n  hint: run 'outbox init --remote ws://host:port' or add a [remote] section to .outbox/config.toml")]
    NoRemote,

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] outbox_core::Error),

    #[error("storage error: {0}")]
    Storage(#[from] outbox_core::StorageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
