// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Relay state: the durable commit log and the rejection policy.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const COMMIT_LOG_FILE: &str = "commits.jsonl";

/// One accepted commit as stored in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Position in the log, starting at 1.
    pub seq: u64,
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
}

/// Result of offering a commit to the relay.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Accepted(u64),
    Rejected(String),
}

/// Shared relay state.
#[derive(Clone)]
pub struct RelayState {
    inner: Arc<RelayStateInner>,
}

struct RelayStateInner {
    log: Mutex<CommitLog>,
    reject: HashSet<String>,
}

/// Append-only JSONL file; each line is fsynced before the append returns.
struct CommitLog {
    path: PathBuf,
    file: File,
    last_seq: u64,
}

impl CommitLog {
    fn open(path: PathBuf) -> io::Result<Self> {
        let last_seq = match File::open(&path) {
            Ok(f) => {
                let mut last = 0;
                for line in BufReader::new(f).lines() {
                    let line = line?;
                    if line.trim().is_empty() {
                        continue;
                    }
                    let record: CommitRecord = serde_json::from_str(&line)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    last = last.max(record.seq);
                }
                last
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(CommitLog {
            path,
            file,
            last_seq,
        })
    }

    fn append(&mut self, action: String, payload: serde_json::Value) -> io::Result<u64> {
        let record = CommitRecord {
            seq: self.last_seq + 1,
            action,
            payload,
            received_at: Utc::now(),
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        self.file.write_all(line.as_bytes())?;
        self.file.sync_data()?;
        self.last_seq = record.seq;
        Ok(record.seq)
    }
}

impl RelayState {
    /// Opens (or creates) the commit log in `data_dir`.
    pub fn open(data_dir: &Path, reject: impl IntoIterator<Item = String>) -> io::Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let log = CommitLog::open(data_dir.join(COMMIT_LOG_FILE))?;
        tracing::debug!(path = %log.path.display(), last_seq = log.last_seq, "opened commit log");
        Ok(RelayState {
            inner: Arc::new(RelayStateInner {
                log: Mutex::new(log),
                reject: reject.into_iter().collect(),
            }),
        })
    }

    /// Records a commit unless its action is on the reject list.
    pub async fn commit(
        &self,
        action: String,
        payload: serde_json::Value,
    ) -> io::Result<CommitOutcome> {
        if self.inner.reject.contains(&action) {
            return Ok(CommitOutcome::Rejected(format!(
                "action '{}' is not accepted",
                action
            )));
        }
        let mut log = self.inner.log.lock().await;
        let seq = log.append(action, payload)?;
        Ok(CommitOutcome::Accepted(seq))
    }

    /// All records in the log, in append order.
    #[cfg(test)]
    pub async fn records(&self) -> io::Result<Vec<CommitRecord>> {
        let path = self.inner.log.lock().await.path.clone();
        let content = std::fs::read_to_string(path)?;
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            })
            .collect()
    }

    pub async fn commit_count(&self) -> u64 {
        self.inner.log.lock().await.last_seq
    }
}
