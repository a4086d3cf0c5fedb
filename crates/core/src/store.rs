// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistent queue storage.
//!
//! The queue is stored as one serialized JSON array under a fixed key. Every
//! save replaces the whole snapshot, so readers never observe a partial write.
//!
//! - [`JsonFileStore`] keeps the array in `offline_sync_queue.json` and writes
//!   through a fsynced temp file followed by a rename.
//! - [`MemoryStore`] keeps the serialized array in a shared in-process slot.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::item::{Mutation, QueueItem};

/// File name of the queue snapshot inside a store directory.
pub const QUEUE_FILE_NAME: &str = "offline_sync_queue.json";

/// Error type for queue storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored content could not be interpreted as a queue.
    #[error("corrupted queue: {0}")]
    Corrupted(String),

    /// Backing store refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable storage of the full, ordered queue snapshot.
pub trait QueueStore<M: Mutation>: Send + Sync {
    /// Reads all items in insertion order.
    fn try_load(&self) -> StorageResult<Vec<QueueItem<M>>>;

    /// Replaces the stored snapshot with `items`.
    fn save(&self, items: &[QueueItem<M>]) -> StorageResult<()>;

    /// Reads all items, treating an unreadable store as empty.
    fn load(&self) -> Vec<QueueItem<M>> {
        match self.try_load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("failed to load sync queue, starting empty: {}", e);
                Vec::new()
            }
        }
    }
}

/// Parses a stored snapshot. Empty content is an empty queue.
fn decode<M: Mutation>(content: &str) -> StorageResult<Vec<QueueItem<M>>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content).map_err(|e| StorageError::Corrupted(e.to_string()))
}

/// Queue store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Path to the queue file.
    path: PathBuf,
}

impl JsonFileStore {
    /// Uses the queue file inside `dir`. The directory must exist.
    pub fn in_dir(dir: &Path) -> Self {
        JsonFileStore {
            path: dir.join(QUEUE_FILE_NAME),
        }
    }

    /// Uses an explicit file path.
    pub fn at(path: &Path) -> Self {
        JsonFileStore {
            path: path.to_path_buf(),
        }
    }

    /// Path to the queue file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl<M: Mutation> QueueStore<M> for JsonFileStore {
    fn try_load(&self) -> StorageResult<Vec<QueueItem<M>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        decode(&content)
    }

    fn save(&self, items: &[QueueItem<M>]) -> StorageResult<()> {
        let json = serde_json::to_string(items)?;
        let tmp = self.temp_path();

        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Queue store holding the serialized snapshot in memory.
///
/// Clones share the same slot, so a clone handed to an engine can be
/// inspected from a test.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw stored content, e.g. a snapshot written by another version.
    pub fn with_content(content: impl Into<String>) -> Self {
        MemoryStore {
            slot: Arc::new(Mutex::new(Some(content.into()))),
        }
    }

    /// Returns the raw stored content.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl<M: Mutation> QueueStore<M> for MemoryStore {
    fn try_load(&self) -> StorageResult<Vec<QueueItem<M>>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))?;
        match slot.as_deref() {
            Some(content) => decode(content),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[QueueItem<M>]) -> StorageResult<()> {
        let json = serde_json::to_string(items)?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))?;
        *slot = Some(json);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
