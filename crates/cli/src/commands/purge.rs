// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::open_outbox;
use crate::error::Result;

pub fn run() -> Result<()> {
    let outbox = open_outbox()?;
    let removed = outbox.engine.purge_synced();
    outbox.ensure_saved()?;

    if removed == 1 {
        println!("Purged 1 synced item");
    } else {
        println!("Purged {} synced items", removed);
    }
    Ok(())
}
