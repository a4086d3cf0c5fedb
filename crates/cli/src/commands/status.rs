// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use outbox_core::QueueStatus;
use serde::Serialize;

use super::{open_outbox, probe_for, runtime, Outbox};
use crate::cli::OutputFormat;
use crate::display::format_status;
use crate::error::Result;

#[derive(Serialize)]
struct StatusJson<'a> {
    #[serde(flatten)]
    status: QueueStatus,
    remote: Option<&'a str>,
}

pub fn run(output: OutputFormat) -> Result<()> {
    let outbox = open_outbox()?;
    if let Some(remote) = outbox.remote() {
        let probe = probe_for(remote)?;
        runtime()?.block_on(probe.update(outbox.engine.monitor()));
    }
    println!("{}", render(&outbox, output)?);
    Ok(())
}

pub fn render(outbox: &Outbox, output: OutputFormat) -> Result<String> {
    let status = outbox.engine.status();
    let remote = outbox.remote().map(|r| r.url.as_str());
    Ok(match output {
        OutputFormat::Text => format_status(&status, remote),
        OutputFormat::Json => serde_json::to_string_pretty(&StatusJson { status, remote })?,
    })
}
