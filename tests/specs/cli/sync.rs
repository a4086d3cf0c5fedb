// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `outbox sync` and `outbox watch` against an unreachable relay.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

#[path = "common.rs"]
mod common;
use common::*;

#[test]
fn sync_requires_remote() {
    let temp = init_temp();

    outbox()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no remote configured"));
}

#[test]
fn sync_while_offline_keeps_queue() {
    let temp = init_temp_offline();
    enqueue(&temp, "a", "1");
    enqueue(&temp, "b", "2");

    outbox()
        .arg("sync")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("unreachable: 2 items waiting"));

    let queue = read_queue(&temp);
    for record in queue.as_array().unwrap() {
        assert_eq!(record["state"], "pending");
        assert_eq!(record["attempts"], 0);
    }
}

#[test]
fn watch_requires_remote() {
    let temp = init_temp();

    outbox()
        .arg("watch")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no remote configured"));
}
