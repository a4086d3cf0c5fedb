// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

const ID_PREFIX: &str = "sync";

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a queue item ID from action and enqueue time.
/// Format: sync-{wall_ms}-{hash} where hash is first 8 hex chars of
/// SHA256(action + timestamp nanos + pid + sequence).
pub fn generate_id(action: &str, enqueued_at: &DateTime<Utc>) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let nanos = enqueued_at.timestamp_nanos_opt().unwrap_or_default();
    let input = format!("{}{}{}{}", action, nanos, std::process::id(), seq);
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!(
        "{}-{}-{}",
        ID_PREFIX,
        enqueued_at.timestamp_millis(),
        short_hash
    )
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_id<F>(action: &str, enqueued_at: &DateTime<Utc>, exists: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(action, enqueued_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
