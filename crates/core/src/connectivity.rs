// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Network reachability as an observable event source.
//!
//! The host (a probe task, a platform callback, a test) reports what it sees
//! through [`ConnectivityMonitor::set_online`]. Subscribers are told about
//! transitions only; repeated reports of the same state are swallowed.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Callback = Arc<dyn Fn(bool) + Send + Sync>;

struct Shared {
    online: bool,
    next_id: u64,
    subscribers: Vec<(u64, Callback)>,
}

/// Current and changing connectivity of the host environment.
///
/// Clones share state.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    shared: Arc<Mutex<Shared>>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        ConnectivityMonitor {
            shared: Arc::new(Mutex::new(Shared {
                online: initially_online,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the last reported state.
    pub fn is_online(&self) -> bool {
        self.lock().online
    }

    /// Reports the host's connectivity. Returns true if this was a transition.
    ///
    /// Callbacks run on the calling thread after the internal lock is released,
    /// so a callback may subscribe, unsubscribe or query the monitor.
    pub fn set_online(&self, online: bool) -> bool {
        let callbacks: Vec<Callback> = {
            let mut shared = self.lock();
            if shared.online == online {
                return false;
            }
            shared.online = online;
            shared.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };

        tracing::info!(online, "connectivity changed");
        for callback in callbacks {
            callback(online);
        }
        true
    }

    /// Registers a listener for every transition.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let mut shared = self.lock();
        let id = shared.next_id;
        shared.next_id += 1;
        shared.subscribers.push((id, Arc::new(callback)));

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for ConnectivityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.lock();
        f.debug_struct("ConnectivityMonitor")
            .field("online", &shared.online)
            .field("subscribers", &shared.subscribers.len())
            .finish()
    }
}

/// Handle for a registered connectivity listener.
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    shared: Weak<Mutex<Shared>>,
}

impl Subscription {
    /// Unregisters the listener.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            let mut shared = shared.lock().unwrap_or_else(|e| e.into_inner());
            shared.subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
#[path = "connectivity_tests.rs"]
mod tests;
