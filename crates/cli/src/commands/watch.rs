// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use outbox_core::QueueStatus;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::{open_outbox, probe_for, runtime};
use crate::display::format_status_line;
use crate::error::Result;

pub fn run() -> Result<()> {
    let outbox = open_outbox()?;
    let remote = outbox.config.require_remote()?;
    let probe = probe_for(remote)?;
    let engine = outbox.engine.clone();

    println!("Watching {} (Ctrl-C to stop)", remote.url);

    runtime()?.block_on(async move {
        let shutdown = CancellationToken::new();

        let signal = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                signal.cancel();
            }
        });

        let probe_task = {
            let monitor = engine.monitor().clone();
            let shutdown = shutdown.clone();
            tokio::spawn(async move { probe.run(monitor, shutdown).await })
        };
        let printer = tokio::spawn(print_changes(engine.subscribe(), shutdown.clone()));

        engine.run(shutdown.clone()).await;

        let _ = probe_task.await;
        let _ = printer.await;
    });

    outbox.ensure_saved()?;
    Ok(())
}

/// Prints a status line whenever the summary changes.
async fn print_changes(mut rx: watch::Receiver<QueueStatus>, shutdown: CancellationToken) {
    let mut last = String::new();
    loop {
        let line = format_status_line(&rx.borrow_and_update());
        if line != last {
            println!("{}", line);
            last = line;
        }
        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
}
