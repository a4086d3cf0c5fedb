// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn outbox() -> Command {
    let mut cmd = cargo_bin_cmd!("outbox");
    cmd.env_remove("OUTBOX_DIR")
        .env_remove("OUTBOX_LOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Helper to create an initialized temp directory (local queue only)
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    outbox()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// URL of a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("ws://{addr}")
}

/// Helper to create an initialized temp directory whose relay is down.
pub fn init_temp_offline() -> TempDir {
    let temp = TempDir::new().unwrap();
    outbox()
        .arg("init")
        .arg("--remote")
        .arg(unreachable_url())
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Queue a mutation without syncing and return its id.
pub fn enqueue(temp: &TempDir, action: &str, payload: &str) -> String {
    let output = outbox()
        .arg("enqueue")
        .arg(action)
        .arg(payload)
        .arg("--no-sync")
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "enqueue failed: {output:?}");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn read_queue(temp: &TempDir) -> serde_json::Value {
    let path = temp.path().join(".outbox/offline_sync_queue.json");
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
