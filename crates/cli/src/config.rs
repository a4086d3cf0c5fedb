// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.outbox/config.toml` and includes:
//! - `max_attempts`: commit attempts per item before drains give up (0 = unlimited)
//! - `remote`: optional relay connection; without it mutations only queue up

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use outbox_core::EngineConfig;

use crate::env;
use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".outbox";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Project configuration stored in `.outbox/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Commit attempts per item before drains stop retrying it (0 = unlimited).
    #[serde(default)]
    pub max_attempts: u32,
    /// Relay configuration (optional - if absent, the queue is local only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

/// Relay connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// WebSocket URL of the relay (`ws://...` or `wss://...`).
    pub url: String,
    /// Delay between reachability probes in `outbox watch` (default: 2000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// Max time for one probe connect (default: 500).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Max time to wait for a commit's ack (default: 5000).
    #[serde(default = "default_commit_timeout_ms")]
    pub commit_timeout_ms: u64,
}

fn default_probe_interval_ms() -> u64 {
    2000
}

fn default_probe_timeout_ms() -> u64 {
    500
}

fn default_commit_timeout_ms() -> u64 {
    5000
}

impl RemoteConfig {
    /// Settings for `url` with default timings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRemoteUrl`] unless the URL is `ws://` or `wss://`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let remote = RemoteConfig {
            url: url.into(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            commit_timeout_ms: default_commit_timeout_ms(),
        };
        remote.validate()?;
        Ok(remote)
    }

    pub fn validate(&self) -> Result<()> {
        crate::sync::socket_addr(&self.url).map(|_| ())
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn commit_timeout(&self) -> Duration {
        Duration::from_millis(self.commit_timeout_ms)
    }
}

impl Config {
    /// Loads configuration from the given `.outbox/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if let Some(remote) = &config.remote {
            remote.validate()?;
        }
        Ok(config)
    }

    /// Saves configuration to the given `.outbox/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_attempts: self.max_attempts,
        }
    }

    /// The relay settings, or [`Error::NoRemote`].
    pub fn require_remote(&self) -> Result<&RemoteConfig> {
        self.remote.as_ref().ok_or(Error::NoRemote)
    }
}

/// Find the `.outbox` directory: `OUTBOX_DIR` if set, otherwise by walking up
/// from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    if let Some(dir) = env::outbox_dir() {
        if dir.join(CONFIG_FILE_NAME).is_file() {
            return Ok(dir);
        }
        return Err(Error::NotInitialized);
    }

    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Initialize a new `.outbox` directory at the given path.
///
/// An existing `.outbox` directory without a config file is reused.
pub fn init_work_dir(path: &Path, remote: Option<RemoteConfig>) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;

    let config = Config {
        remote,
        ..Config::default()
    };
    config.save(&work_dir)?;

    Ok(work_dir)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
