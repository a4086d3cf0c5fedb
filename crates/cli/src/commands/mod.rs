// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod enqueue;
pub mod init;
pub mod list;
pub mod purge;
pub mod status;
pub mod sync;
pub mod watch;

use std::path::{Path, PathBuf};

use outbox_core::{
    commit_fn, CommitError, Committer, ConnectivityMonitor, JsonFileStore, RawMutation, SyncEngine,
};

use crate::config::{find_work_dir, Config, RemoteConfig};
use crate::error::Result;
use crate::sync::{TcpProbe, WebSocketCommitter};

/// Committer used by the CLI: the relay, or a stand-in when none is configured.
pub type CliCommitter = Box<dyn Committer<RawMutation>>;

/// The engine as the CLI runs it.
pub type CliEngine = SyncEngine<RawMutation, JsonFileStore, CliCommitter>;

/// An opened `.outbox` directory.
pub struct Outbox {
    pub work_dir: PathBuf,
    pub config: Config,
    pub engine: CliEngine,
}

impl Outbox {
    /// Loads the config and queue in `work_dir`.
    ///
    /// The connectivity monitor starts offline; commands that sync probe the
    /// relay first, so enqueueing never waits on the network.
    pub fn open(work_dir: &Path) -> Result<Self> {
        let config = Config::load(work_dir)?;
        let committer: CliCommitter = match &config.remote {
            Some(remote) => Box::new(WebSocketCommitter::new(
                remote.url.clone(),
                remote.commit_timeout(),
            )),
            None => Box::new(commit_fn(|_m: RawMutation| async {
                Err::<(), _>(CommitError::Transport("no remote configured".into()))
            })),
        };
        let engine = SyncEngine::new(
            JsonFileStore::in_dir(work_dir),
            committer,
            ConnectivityMonitor::new(false),
            config.engine_config(),
        );
        Ok(Outbox {
            work_dir: work_dir.to_path_buf(),
            config,
            engine,
        })
    }

    pub fn remote(&self) -> Option<&RemoteConfig> {
        self.config.remote.as_ref()
    }

    /// Writes the queue again if the last save failed.
    ///
    /// A one-shot command exits right after, so an unsaved queue is an error.
    pub fn ensure_saved(&self) -> Result<()> {
        if self.engine.status().unsaved {
            self.engine.flush()?;
        }
        Ok(())
    }
}

/// Helper to open the outbox from the current context.
pub fn open_outbox() -> Result<Outbox> {
    let work_dir = find_work_dir()?;
    Outbox::open(&work_dir)
}

pub fn probe_for(remote: &RemoteConfig) -> Result<TcpProbe> {
    TcpProbe::for_url(&remote.url, remote.probe_timeout(), remote.probe_interval())
}

/// Runtime for commands that talk to the relay.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
