// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate views over a queue snapshot for display.

use serde::{Deserialize, Serialize};

use crate::item::{ItemState, QueueItem};

/// Number of items in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub pending: usize,
    pub syncing: usize,
    pub synced: usize,
    pub failed: usize,
}

impl Counts {
    /// Counts items per state.
    pub fn of<M>(items: &[QueueItem<M>]) -> Self {
        let mut counts = Counts::default();
        for item in items {
            *counts.slot(item.state) += 1;
        }
        counts
    }

    fn slot(&mut self, state: ItemState) -> &mut usize {
        match state {
            ItemState::Pending => &mut self.pending,
            ItemState::Syncing => &mut self.syncing,
            ItemState::Synced => &mut self.synced,
            ItemState::Failed => &mut self.failed,
        }
    }

    /// Count for one state.
    pub fn get(&self, state: ItemState) -> usize {
        match state {
            ItemState::Pending => self.pending,
            ItemState::Syncing => self.syncing,
            ItemState::Synced => self.synced,
            ItemState::Failed => self.failed,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.syncing + self.synced + self.failed
    }

    /// Items that still need a successful commit.
    pub fn outstanding(&self) -> usize {
        self.pending + self.syncing + self.failed
    }
}

/// Counts per state of `items`.
pub fn counts<M>(items: &[QueueItem<M>]) -> Counts {
    Counts::of(items)
}

/// Engine-level status published to observers after every queue change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub counts: Counts,
    /// Last connectivity state reported by the monitor.
    pub online: bool,
    /// A drain pass is in flight.
    pub draining: bool,
    /// The last save failed; the in-memory queue is ahead of the store.
    pub unsaved: bool,
    /// Failed items that reached the retry limit.
    pub exhausted: usize,
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
