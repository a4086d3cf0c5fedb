// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use outbox_core::{QueueItem, RawMutation};

use super::{open_outbox, Outbox};
use crate::error::{Error, Result};

pub fn run(action: String, payload: Option<String>, no_sync: bool) -> Result<()> {
    let mutation = parse_mutation(action, payload.as_deref())?;
    let outbox = open_outbox()?;
    let item = enqueue(&outbox, mutation)?;
    println!("{}", item.id);

    if !no_sync && outbox.remote().is_some() {
        // Best effort: the item is already durable.
        if let Err(e) = super::sync::sync_once(&outbox) {
            tracing::warn!("sync after enqueue failed: {}", e);
        }
    }
    Ok(())
}

/// Builds a mutation from the command line. A missing payload is `null`.
pub fn parse_mutation(action: String, payload: Option<&str>) -> Result<RawMutation> {
    let payload = match payload {
        Some(text) => {
            serde_json::from_str(text).map_err(|e| Error::InvalidPayload(e.to_string()))?
        }
        None => serde_json::Value::Null,
    };
    Ok(RawMutation::new(action, payload))
}

/// Queues `mutation` and makes sure it reached disk.
pub fn enqueue(outbox: &Outbox, mutation: RawMutation) -> Result<QueueItem> {
    let item = outbox.engine.enqueue(mutation);
    outbox.ensure_saved()?;
    Ok(item)
}
