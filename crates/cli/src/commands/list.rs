// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use outbox_core::{ItemState, QueueItem};

use super::open_outbox;
use crate::cli::OutputFormat;
use crate::display::format_item_line;
use crate::error::Result;

pub fn run(state: Option<ItemState>, output: OutputFormat) -> Result<()> {
    let outbox = open_outbox()?;
    let items = select(outbox.engine.items(), state);

    match output {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No items");
            }
            for item in &items {
                println!("{}", format_item_line(item));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }
    Ok(())
}

/// Items in enqueue order, optionally restricted to one state.
pub fn select(items: Vec<QueueItem>, state: Option<ItemState>) -> Vec<QueueItem> {
    match state {
        Some(state) => items.into_iter().filter(|i| i.state == state).collect(),
        None => items,
    }
}
