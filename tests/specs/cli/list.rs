// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `outbox list`, `outbox status` and `outbox purge`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

#[path = "common.rs"]
mod common;
use common::*;

/// Rewrites one field of the record at `index` in the queue file.
fn patch(temp: &TempDir, index: usize, key: &str, value: serde_json::Value) {
    let mut queue = read_queue(temp);
    queue[index][key] = value;
    std::fs::write(
        temp.path().join(".outbox/offline_sync_queue.json"),
        serde_json::to_string(&queue).unwrap(),
    )
    .unwrap();
}

fn set_state(temp: &TempDir, index: usize, state: &str) {
    patch(temp, index, "state", state.into());
}

#[test]
fn list_empty_queue() {
    let temp = init_temp();
    outbox()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("No items\n");
}

#[test]
fn list_shows_items_in_order() {
    let temp = init_temp();
    let a = enqueue(&temp, "create_post", r#"{"n":1}"#);
    let b = enqueue(&temp, "delete_post", r#"{"n":2}"#);

    let output = outbox()
        .arg("list")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[pending] create_post"));
    assert!(lines[0].contains(&a));
    assert!(lines[1].contains("[pending] delete_post"));
    assert!(lines[1].contains(&b));
}

#[test]
fn list_filters_by_state() {
    let temp = init_temp();
    enqueue(&temp, "a", "1");
    enqueue(&temp, "b", "2");
    set_state(&temp, 0, "synced");

    outbox()
        .args(["list", "--state", "synced"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[synced] a"))
        .stdout(predicate::str::contains("] b").not());
}

#[test]
fn list_json() {
    let temp = init_temp();
    let id = enqueue(&temp, "a", r#"{"k":"v"}"#);

    let output = outbox()
        .args(["list", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(items[0]["id"], id.as_str());
    assert_eq!(items[0]["payload"]["k"], "v");
}

#[test]
fn interrupted_commit_lists_as_failed() {
    let temp = init_temp();
    enqueue(&temp, "a", "1");
    set_state(&temp, 0, "syncing");
    patch(&temp, 0, "attempts", 1.into());

    outbox()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[failed] a"))
        .stdout(predicate::str::contains("last error: interrupted"));
}

#[test]
fn status_counts() {
    let temp = init_temp();
    enqueue(&temp, "a", "1");
    enqueue(&temp, "b", "2");
    enqueue(&temp, "c", "3");
    set_state(&temp, 1, "synced");

    outbox()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue: 3 items (2 outstanding)"))
        .stdout(predicate::str::contains("  pending: 2"))
        .stdout(predicate::str::contains("  synced: 1"))
        .stdout(predicate::str::contains("Remote: none (local only)"));
}

#[test]
fn status_json_reports_offline_remote() {
    let temp = init_temp_offline();
    enqueue(&temp, "a", "1");

    let output = outbox()
        .args(["status", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(status["counts"]["pending"], 1);
    assert_eq!(status["online"], false);
    assert_eq!(status["draining"], false);
    assert!(status["remote"].as_str().unwrap().starts_with("ws://127.0.0.1:"));
}

#[test]
fn purge_removes_only_synced() {
    let temp = init_temp();
    enqueue(&temp, "a", "1");
    enqueue(&temp, "b", "2");
    enqueue(&temp, "c", "3");
    set_state(&temp, 0, "synced");
    set_state(&temp, 2, "synced");

    outbox()
        .arg("purge")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("Purged 2 synced items\n");

    let queue = read_queue(&temp);
    let queue = queue.as_array().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["action"], "b");
}
