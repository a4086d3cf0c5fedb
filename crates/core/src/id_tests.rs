// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use std::collections::HashSet;

fn at(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms).unwrap()
}

#[test]
fn id_has_prefix_timestamp_and_hash() {
    let id = generate_id("create_post", &at(1_700_000_000_123));
    let parts: Vec<&str> = id.split('-').collect();

    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], "sync");
    assert_eq!(parts[1], "1700000000123");
    assert_eq!(parts[2].len(), 8);
    assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn same_input_yields_distinct_ids() {
    let when = at(1_000);
    let ids: HashSet<String> = (0..100).map(|_| generate_id("x", &when)).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn unique_id_without_collision_is_base() {
    let id = generate_unique_id("x", &at(1_000), |_| false);
    assert!(!id.ends_with("-2"));
    assert_eq!(id.split('-').count(), 3);
}

#[test]
fn unique_id_appends_suffix_on_collision() {
    let taken: std::cell::RefCell<Vec<String>> = std::cell::RefCell::new(Vec::new());
    let id = generate_unique_id("x", &at(1_000), |candidate| {
        let mut seen = taken.borrow_mut();
        if seen.is_empty() || candidate.ends_with("-2") {
            seen.push(candidate.to_string());
            true
        } else {
            false
        }
    });
    assert!(id.ends_with("-3"), "got {id}");
}
