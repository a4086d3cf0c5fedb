// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `OUTBOX_DIR` if set: an explicit `.outbox` directory.
pub fn outbox_dir() -> Option<PathBuf> {
    std::env::var(vars::OUTBOX_DIR).ok().map(PathBuf::from)
}

/// Returns the value of `OUTBOX_LOG` if set: a tracing filter directive.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::OUTBOX_LOG).ok().filter(|v| !v.is_empty())
}
