// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine: drains the offline queue through a [`Committer`].
//!
//! The engine owns the in-memory copy of the queue and writes the full
//! snapshot back to its [`QueueStore`] after every change. A drain pass
//! commits items one at a time in enqueue order and records each outcome
//! before moving on, so a crash loses at most the in-flight item's result.
//!
//! # Triggers
//!
//! - [`SyncEngine::enqueue`] while online and idle spawns a drain.
//! - An offline→online transition spawns a drain once
//!   [`SyncEngine::watch_connectivity`] (or [`SyncEngine::run`]) is active.
//! - [`SyncEngine::sync_now`] / [`SyncEngine::drain`] on demand.
//!
//! Nothing drains while the monitor reports offline, and a drain requested
//! while another is in flight is dropped, not queued.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::commit::{CommitResult, Committer};
use crate::connectivity::{ConnectivityMonitor, Subscription};
use crate::id::generate_unique_id;
use crate::item::{ItemState, Mutation, QueueItem};
use crate::status::{Counts, QueueStatus};
use crate::store::{QueueStore, StorageResult};

/// Reason recorded on items whose commit outcome was never observed.
pub const INTERRUPTED: &str = "interrupted";

/// Engine tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Commit attempts per item before drains stop retrying it (0 = unlimited).
    #[serde(default)]
    pub max_attempts: u32,
}

/// Outcome of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    /// Commit attempts made.
    pub attempted: usize,
    pub synced: usize,
    pub failed: usize,
    /// The pass ended early because connectivity was lost.
    pub stopped_offline: bool,
}

struct QueueState<M> {
    items: Vec<QueueItem<M>>,
    /// The last save failed.
    unsaved: bool,
}

struct Inner<M, S, C> {
    store: S,
    committer: C,
    monitor: ConnectivityMonitor,
    config: EngineConfig,
    queue: Mutex<QueueState<M>>,
    draining: AtomicBool,
    status_tx: watch::Sender<QueueStatus>,
}

/// Handle to a sync engine. Clones share the same queue.
pub struct SyncEngine<M, S, C> {
    inner: Arc<Inner<M, S, C>>,
}

impl<M, S, C> Clone for SyncEngine<M, S, C> {
    fn clone(&self) -> Self {
        SyncEngine {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M, S, C> SyncEngine<M, S, C>
where
    M: Mutation,
    S: QueueStore<M> + 'static,
    C: Committer<M> + 'static,
{
    /// Creates an engine over the queue currently in `store`.
    ///
    /// Items left in `syncing` by an interrupted drain are marked failed so
    /// the next drain retries them. Duplicate ids keep their first record.
    pub fn new(store: S, committer: C, monitor: ConnectivityMonitor, config: EngineConfig) -> Self {
        let mut items = store.load();
        let mut changed = dedupe(&mut items);

        for item in items.iter_mut().filter(|i| i.state == ItemState::Syncing) {
            if item.mark_failed(INTERRUPTED).is_ok() {
                tracing::warn!(id = %item.id, "recovered interrupted commit as failed");
                changed = true;
            }
        }

        let mut state = QueueState {
            items,
            unsaved: false,
        };
        if changed {
            if let Err(e) = store.save(&state.items) {
                tracing::warn!("failed to save recovered sync queue: {}", e);
                state.unsaved = true;
            }
        }

        let initial = QueueStatus {
            counts: Counts::of(&state.items),
            online: monitor.is_online(),
            draining: false,
            unsaved: state.unsaved,
            exhausted: exhausted(&state.items, config.max_attempts),
        };
        let (status_tx, _) = watch::channel(initial);

        SyncEngine {
            inner: Arc::new(Inner {
                store,
                committer,
                monitor,
                config,
                queue: Mutex::new(state),
                draining: AtomicBool::new(false),
                status_tx,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<M>> {
        self.inner.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Writes the full snapshot. On failure the in-memory queue is kept and
    /// the next save writes it again.
    fn persist(&self, state: &mut QueueState<M>) -> StorageResult<()> {
        match self.inner.store.save(&state.items) {
            Ok(()) => {
                state.unsaved = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(items = state.items.len(), "failed to save sync queue: {}", e);
                state.unsaved = true;
                Err(e)
            }
        }
    }

    fn status_of(&self, state: &QueueState<M>) -> QueueStatus {
        QueueStatus {
            counts: Counts::of(&state.items),
            online: self.inner.monitor.is_online(),
            draining: self.is_draining(),
            unsaved: state.unsaved,
            exhausted: exhausted(&state.items, self.inner.config.max_attempts),
        }
    }

    fn publish(&self, state: &QueueState<M>) {
        self.inner.status_tx.send_replace(self.status_of(state));
    }

    fn publish_current(&self) {
        let state = self.lock();
        self.publish(&state);
    }

    /// Appends a new pending item and persists the queue.
    ///
    /// Spawns a drain on the current tokio runtime when online and idle.
    /// Storage failures are logged and reported through [`QueueStatus::unsaved`];
    /// the item stays queued in memory.
    pub fn enqueue(&self, mutation: M) -> QueueItem<M> {
        let now = Utc::now();
        let item = {
            let mut state = self.lock();
            let id = generate_unique_id(mutation.action(), &now, |candidate| {
                state.items.iter().any(|i| i.id == candidate)
            });
            let item = QueueItem::new(id, mutation, now);
            state.items.push(item.clone());
            let _ = self.persist(&mut state);
            self.publish(&state);
            item
        };
        tracing::debug!(id = %item.id, action = item.action(), "enqueued mutation");

        if self.inner.monitor.is_online() && !self.is_draining() {
            self.spawn_drain();
        }
        item
    }

    /// Starts a drain in the background if a tokio runtime is available.
    fn spawn_drain(&self) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let engine = self.clone();
                handle.spawn(async move {
                    engine.drain().await;
                });
            }
            Err(_) => {
                tracing::debug!("no async runtime, drain deferred to next trigger");
            }
        }
    }

    /// Runs one drain pass.
    ///
    /// Returns `None` without committing anything when offline or when a
    /// drain is already in flight.
    pub async fn drain(&self) -> Option<DrainReport> {
        if !self.inner.monitor.is_online() {
            tracing::debug!("offline, skipping drain");
            return None;
        }
        if self
            .inner
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("drain already in flight");
            return None;
        }

        let mut guard = DrainGuard {
            engine: self,
            in_flight: None,
        };
        self.publish_current();

        let mut attempted: HashSet<String> = HashSet::new();
        let mut report = DrainReport::default();

        loop {
            if !self.inner.monitor.is_online() {
                report.stopped_offline = true;
                break;
            }
            let Some((id, mutation)) = self.begin_next(&attempted) else {
                break;
            };
            attempted.insert(id.clone());
            guard.in_flight = Some(id.clone());

            let outcome = self.inner.committer.commit(&mutation).await;

            guard.in_flight = None;
            report.attempted += 1;
            match self.finish(&id, outcome) {
                Some(ItemState::Synced) => report.synced += 1,
                Some(ItemState::Failed) => report.failed += 1,
                _ => {}
            }
        }

        drop(guard);

        if report.attempted > 0 || report.stopped_offline {
            tracing::info!(
                attempted = report.attempted,
                synced = report.synced,
                failed = report.failed,
                stopped_offline = report.stopped_offline,
                "drain finished"
            );
        }
        Some(report)
    }

    /// Drain requested by the user.
    pub async fn sync_now(&self) -> Option<DrainReport> {
        self.drain().await
    }

    /// Picks the first eligible item in FIFO order and marks it syncing.
    fn begin_next(&self, attempted: &HashSet<String>) -> Option<(String, M)> {
        let mut state = self.lock();
        let max_attempts = self.inner.config.max_attempts;
        let idx = state.items.iter().position(|item| match item.state {
            ItemState::Pending => true,
            ItemState::Failed => !attempted.contains(&item.id) && !item.is_exhausted(max_attempts),
            ItemState::Syncing | ItemState::Synced => false,
        })?;

        let item = &mut state.items[idx];
        if let Err(e) = item.begin_attempt(Utc::now()) {
            tracing::warn!(id = %item.id, "cannot start commit: {}", e);
            return None;
        }
        let picked = (item.id.clone(), item.mutation.clone());
        self.publish(&state);
        Some(picked)
    }

    /// Records a commit outcome and persists the queue.
    fn finish(&self, id: &str, outcome: CommitResult<()>) -> Option<ItemState> {
        let mut state = self.lock();
        let Some(item) = state.items.iter_mut().find(|i| i.id == id) else {
            tracing::warn!(id, "committed item vanished from queue");
            return None;
        };

        let result = match &outcome {
            Ok(()) => {
                tracing::debug!(id, action = item.action(), "commit succeeded");
                item.mark_synced()
            }
            Err(e) => {
                tracing::warn!(id, attempts = item.attempts, "commit failed: {}", e);
                item.mark_failed(e.to_string())
            }
        };
        if let Err(e) = result {
            tracing::warn!(id, "cannot record commit outcome: {}", e);
        }
        let final_state = item.state;

        let _ = self.persist(&mut state);
        self.publish(&state);
        Some(final_state)
    }

    /// Removes every synced item. Returns how many were removed.
    pub fn purge_synced(&self) -> usize {
        let mut state = self.lock();
        let before = state.items.len();
        state.items.retain(|i| i.state != ItemState::Synced);
        let removed = before - state.items.len();

        if removed > 0 {
            let _ = self.persist(&mut state);
            tracing::info!(removed, "purged synced items");
        }
        self.publish(&state);
        removed
    }

    /// Writes the in-memory queue to the store.
    pub fn flush(&self) -> StorageResult<()> {
        let mut state = self.lock();
        let result = self.persist(&mut state);
        self.publish(&state);
        result
    }

    /// Snapshot of all items in enqueue order.
    pub fn items(&self) -> Vec<QueueItem<M>> {
        self.lock().items.clone()
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.lock().items)
    }

    pub fn status(&self) -> QueueStatus {
        let state = self.lock();
        self.status_of(&state)
    }

    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Acquire)
    }

    pub fn monitor(&self) -> &ConnectivityMonitor {
        &self.inner.monitor
    }

    /// Status updates, sent after every queue or connectivity change.
    pub fn subscribe(&self) -> watch::Receiver<QueueStatus> {
        self.inner.status_tx.subscribe()
    }

    /// Spawns a drain on every offline→online transition.
    ///
    /// The engine is held weakly; the subscription does not keep it alive.
    pub fn watch_connectivity(&self) -> Subscription {
        let weak = Arc::downgrade(&self.inner);
        self.inner.monitor.on_change(move |online| {
            if let Some(inner) = weak.upgrade() {
                let engine = SyncEngine { inner };
                engine.publish_current();
                if online {
                    engine.spawn_drain();
                }
            }
        })
    }

    /// Drains on reconnect until `shutdown` is cancelled.
    ///
    /// Drains once at start if already online, then once per offline→online
    /// transition. Drains run on this task, one after another.
    pub async fn run(&self, shutdown: CancellationToken) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _subscription = self.inner.monitor.on_change(move |online| {
            let _ = tx.send(online);
        });

        if self.inner.monitor.is_online() {
            self.drain().await;
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = rx.recv() => {
                    let Some(online) = event else { break };
                    self.publish_current();
                    if online {
                        self.drain().await;
                    }
                }
            }
        }
        tracing::debug!("sync engine stopped");
    }

    /// Marks an item whose commit future was dropped as failed.
    fn interrupt(&self, id: &str) {
        let mut state = self.lock();
        let Some(idx) = state
            .items
            .iter()
            .position(|i| i.id == id && i.state == ItemState::Syncing)
        else {
            return;
        };
        if state.items[idx].mark_failed(INTERRUPTED).is_ok() {
            tracing::warn!(id, "drain dropped mid-commit, marked failed");
        }
        let _ = self.persist(&mut state);
    }
}

/// Clears the in-flight flag when a drain ends, including when its future
/// is dropped mid-commit.
struct DrainGuard<'a, M, S, C>
where
    M: Mutation,
    S: QueueStore<M> + 'static,
    C: Committer<M> + 'static,
{
    engine: &'a SyncEngine<M, S, C>,
    in_flight: Option<String>,
}

impl<M, S, C> Drop for DrainGuard<'_, M, S, C>
where
    M: Mutation,
    S: QueueStore<M> + 'static,
    C: Committer<M> + 'static,
{
    fn drop(&mut self) {
        if let Some(id) = self.in_flight.take() {
            self.engine.interrupt(&id);
        }
        self.engine.inner.draining.store(false, Ordering::Release);
        self.engine.publish_current();
    }
}

/// Drops records whose id was already seen. Returns true if any were dropped.
fn dedupe<M>(items: &mut Vec<QueueItem<M>>) -> bool {
    let before = items.len();
    let mut seen = HashSet::new();
    items.retain(|item| {
        let first = seen.insert(item.id.clone());
        if !first {
            tracing::warn!(id = %item.id, "dropping duplicate queue record");
        }
        first
    });
    items.len() != before
}

fn exhausted<M: Mutation>(items: &[QueueItem<M>], max_attempts: u32) -> usize {
    items.iter().filter(|i| i.is_exhausted(max_attempts)).count()
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
