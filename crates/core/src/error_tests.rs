// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    invalid_state = { Error::InvalidState("queued".into()), "queued" },
    item_not_found = { Error::ItemNotFound("sync-1-abcd".into()), "sync-1-abcd" },
    storage = { Error::Storage(StorageError::Unavailable("quota".into())), "quota" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_invalid_transition_display() {
    let err = Error::InvalidTransition {
        from: "synced".into(),
        to: "pending".into(),
        valid_targets: "(none)".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("synced"));
    assert!(msg.contains("pending"));
    assert!(msg.contains("hint"));
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn error_from_storage() {
    let err: Error = StorageError::Corrupted("truncated".into()).into();
    assert!(matches!(err, Error::Storage(StorageError::Corrupted(_))));
}
