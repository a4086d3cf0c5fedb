// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::config::{init_work_dir, RemoteConfig};
use crate::error::Result;

pub fn run(path: Option<String>, remote: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };
    let remote = remote.map(RemoteConfig::new).transpose()?;
    let url = remote.as_ref().map(|r| r.url.clone());

    let work_dir = init_work_dir(&target_path, remote)?;

    println!("Initialized outbox at {}", work_dir.display());
    match url {
        Some(url) => println!("Remote: {}", url),
        None => println!("Remote: none (local only)"),
    }
    Ok(())
}
