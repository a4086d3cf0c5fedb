// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `outbox init`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

#[path = "common.rs"]
mod common;
use common::*;

#[test]
fn creates_outbox_directory() {
    let temp = TempDir::new().unwrap();

    outbox()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized outbox at"))
        .stdout(predicate::str::contains("local only"));

    assert!(temp.path().join(".outbox/config.toml").exists());
    // The queue file appears on first enqueue.
    assert!(!temp.path().join(".outbox/offline_sync_queue.json").exists());
}

#[test]
fn fails_if_already_initialized() {
    let temp = init_temp();

    outbox()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn records_remote() {
    let temp = TempDir::new().unwrap();

    outbox()
        .args(["init", "--remote", "ws://localhost:7890"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Remote: ws://localhost:7890"));

    let config = std::fs::read_to_string(temp.path().join(".outbox/config.toml")).unwrap();
    assert!(config.contains("url = \"ws://localhost:7890\""));
    assert!(config.contains("commit_timeout_ms = 5000"));
}

#[test]
fn rejects_non_websocket_remote() {
    let temp = TempDir::new().unwrap();

    outbox()
        .args(["init", "--remote", "https://example.com"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid remote URL"));

    assert!(!temp.path().join(".outbox").exists());
}

#[test]
fn init_at_path() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("project");
    std::fs::create_dir_all(&target).unwrap();

    outbox()
        .arg("init")
        .arg(&target)
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(target.join(".outbox/config.toml").exists());
}

#[test]
fn commands_require_init() {
    let temp = TempDir::new().unwrap();

    for args in [vec!["status"], vec!["list"], vec!["enqueue", "a"], vec!["purge"]] {
        outbox()
            .args(&args)
            .current_dir(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("outbox init"));
    }
}

#[test]
fn finds_outbox_from_subdirectory() {
    let temp = init_temp();
    let nested = temp.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    outbox()
        .args(["enqueue", "ping", "--no-sync"])
        .current_dir(&nested)
        .assert()
        .success();

    assert_eq!(read_queue(&temp).as_array().unwrap().len(), 1);
}

#[test]
fn outbox_dir_env_overrides_lookup() {
    let temp = init_temp();
    let elsewhere = TempDir::new().unwrap();

    outbox()
        .args(["enqueue", "ping", "--no-sync"])
        .env("OUTBOX_DIR", temp.path().join(".outbox"))
        .current_dir(elsewhere.path())
        .assert()
        .success();

    assert_eq!(read_queue(&temp).as_array().unwrap().len(), 1);
}
