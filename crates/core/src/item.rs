// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue item types for the offline mutation queue.
//!
//! A [`QueueItem`] wraps one client-side [`Mutation`] together with its sync
//! bookkeeping. The mutation is flattened into the record, so the persisted
//! layout is `{id, action, payload, enqueuedAt, state, ...}` regardless of
//! whether the mutation is a typed enum or a [`RawMutation`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A client-side change waiting to be committed to the remote backend.
///
/// Typed mutations are usually an adjacently tagged enum:
///
/// ```rust,ignore
/// #[derive(Clone, Serialize, Deserialize)]
/// #[serde(tag = "action", content = "payload", rename_all = "snake_case")]
/// enum ProfileMutation {
///     Rename { name: String },
///     SetAvatar { url: String },
/// }
/// ```
pub trait Mutation: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Name of the remote operation this mutation maps to.
    fn action(&self) -> &str;
}

/// An untyped mutation: an action tag and an arbitrary JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMutation {
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl RawMutation {
    pub fn new(action: impl Into<String>, payload: serde_json::Value) -> Self {
        RawMutation {
            action: action.into(),
            payload,
        }
    }
}

impl Mutation for RawMutation {
    fn action(&self) -> &str {
        &self.action
    }
}

/// Sync state of a queued item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Waiting for a drain pass. Initial state for new items.
    Pending,
    /// A drain pass is committing this item.
    Syncing,
    /// Committed to the remote backend.
    Synced,
    /// The last commit attempt failed; retried by a later drain pass.
    Failed,
}

impl ItemState {
    /// All states, in display order.
    pub const ALL: [ItemState; 4] = [
        ItemState::Pending,
        ItemState::Syncing,
        ItemState::Synced,
        ItemState::Failed,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Pending => "pending",
            ItemState::Syncing => "syncing",
            ItemState::Synced => "synced",
            ItemState::Failed => "failed",
        }
    }

    /// Check if a transition from this state to target is valid.
    pub fn can_transition_to(&self, target: ItemState) -> bool {
        matches!(
            (self, target),
            (ItemState::Pending, ItemState::Syncing)
                | (ItemState::Failed, ItemState::Syncing)
                | (ItemState::Syncing, ItemState::Synced)
                | (ItemState::Syncing, ItemState::Failed)
        )
    }

    /// Get valid transition targets as a formatted string.
    pub fn valid_targets(&self) -> String {
        match self {
            ItemState::Pending | ItemState::Failed => "syncing".to_string(),
            ItemState::Syncing => "synced, failed".to_string(),
            ItemState::Synced => "(none, purge only)".to_string(),
        }
    }

    /// Returns true if no engine-driven transition leaves this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemState::Synced)
    }

    /// Returns true if a drain pass may pick this item up.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ItemState::Pending | ItemState::Failed)
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ItemState::Pending),
            "syncing" => Ok(ItemState::Syncing),
            "synced" => Ok(ItemState::Synced),
            "failed" => Ok(ItemState::Failed),
            _ => Err(Error::InvalidState(s.to_string())),
        }
    }
}

/// One queued mutation and its sync bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem<M = RawMutation> {
    /// Unique within the queue; assigned at enqueue time.
    pub id: String,
    #[serde(flatten)]
    pub mutation: M,
    pub enqueued_at: DateTime<Utc>,
    pub state: ItemState,
    /// Number of commit attempts so far.
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl<M: Mutation> QueueItem<M> {
    /// Creates a new pending item.
    pub fn new(id: String, mutation: M, enqueued_at: DateTime<Utc>) -> Self {
        QueueItem {
            id,
            mutation,
            enqueued_at,
            state: ItemState::Pending,
            attempts: 0,
            last_error: None,
            last_attempt_at: None,
        }
    }

    /// Returns the action tag of the wrapped mutation.
    pub fn action(&self) -> &str {
        self.mutation.action()
    }

    /// Moves the item to `target`, rejecting edges outside the state machine.
    pub fn transition_to(&mut self, target: ItemState) -> Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(Error::InvalidTransition {
                from: self.state.to_string(),
                to: target.to_string(),
                valid_targets: self.state.valid_targets(),
            });
        }
        tracing::debug!(id = %self.id, from = %self.state, to = %target, "queue item transition");
        self.state = target;
        Ok(())
    }

    /// Starts a commit attempt (`pending|failed -> syncing`).
    pub fn begin_attempt(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition_to(ItemState::Syncing)?;
        self.attempts = self.attempts.saturating_add(1);
        self.last_attempt_at = Some(now);
        Ok(())
    }

    /// Records a successful commit (`syncing -> synced`).
    pub fn mark_synced(&mut self) -> Result<()> {
        self.transition_to(ItemState::Synced)?;
        self.last_error = None;
        Ok(())
    }

    /// Records a failed commit (`syncing -> failed`).
    pub fn mark_failed(&mut self, reason: impl Into<String>) -> Result<()> {
        self.transition_to(ItemState::Failed)?;
        self.last_error = Some(reason.into());
        Ok(())
    }

    /// Returns true once a failed item has used up its attempts.
    ///
    /// `max_attempts == 0` means unlimited.
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        max_attempts > 0 && self.state == ItemState::Failed && self.attempts >= max_attempts
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
