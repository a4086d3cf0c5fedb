// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use outbox_core::DrainReport;

use super::{open_outbox, probe_for, runtime, Outbox};
use crate::display::format_drain_report;
use crate::error::Result;

pub fn run() -> Result<()> {
    let outbox = open_outbox()?;
    let remote = outbox.config.require_remote()?;

    match sync_once(&outbox)? {
        Some(report) => println!("{}", format_drain_report(&report)),
        None => println!(
            "Remote {} unreachable: {} items waiting",
            remote.url,
            outbox.engine.counts().outstanding()
        ),
    }
    Ok(())
}

/// Probes the relay once and drains if it is reachable.
///
/// Returns `None` when the relay is unreachable.
pub fn sync_once(outbox: &Outbox) -> Result<Option<DrainReport>> {
    let remote = outbox.config.require_remote()?;
    let probe = probe_for(remote)?;
    let engine = outbox.engine.clone();

    let report = runtime()?.block_on(async move {
        if !probe.update(engine.monitor()).await {
            tracing::info!(addr = probe.addr(), "relay unreachable, nothing synced");
            return None;
        }
        engine.sync_now().await
    });

    outbox.ensure_saved()?;
    Ok(report)
}
