// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `outbox enqueue`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

#[path = "common.rs"]
mod common;
use common::*;

#[test]
fn prints_generated_id() {
    let temp = init_temp();
    let id = enqueue(&temp, "create_post", r#"{"title":"hi"}"#);

    assert!(id.starts_with("sync-"), "unexpected id {id}");
    assert_eq!(id.split('-').count(), 3);
}

#[test]
fn writes_camel_case_record() {
    let temp = init_temp();
    let id = enqueue(&temp, "create_post", r#"{"title":"hi"}"#);

    let queue = read_queue(&temp);
    let record = &queue[0];
    assert_eq!(record["id"], id.as_str());
    assert_eq!(record["action"], "create_post");
    assert_eq!(record["payload"]["title"], "hi");
    assert_eq!(record["state"], "pending");
    assert!(record["enqueuedAt"].is_string());
}

#[test]
fn preserves_fifo_order() {
    let temp = init_temp();
    let first = enqueue(&temp, "a", "1");
    let second = enqueue(&temp, "b", "2");
    let third = enqueue(&temp, "c", "3");

    let ids: Vec<_> = read_queue(&temp)
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn payload_defaults_to_null() {
    let temp = init_temp();
    outbox()
        .args(["enqueue", "logout"])
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(read_queue(&temp)[0]["payload"].is_null());
}

#[test]
fn rejects_invalid_json_payload() {
    let temp = init_temp();

    outbox()
        .args(["enqueue", "create_post", "{not json"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid payload"));

    assert!(!temp.path().join(".outbox/offline_sync_queue.json").exists());
}

#[test]
fn offline_remote_keeps_item_pending() {
    let temp = init_temp_offline();

    outbox()
        .args(["enqueue", "create_post", "{}"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sync-"));

    assert_eq!(read_queue(&temp)[0]["state"], "pending");
}

#[test]
fn corrupt_queue_file_starts_empty() {
    let temp = init_temp();
    std::fs::write(temp.path().join(".outbox/offline_sync_queue.json"), "{broken").unwrap();

    enqueue(&temp, "a", "1");

    assert_eq!(read_queue(&temp).as_array().unwrap().len(), 1);
}
