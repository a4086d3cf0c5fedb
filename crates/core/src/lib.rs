// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! outbox-core: offline mutation queue and sync engine.
//!
//! Mutations made while the network is unavailable are appended to a durable
//! queue and later committed, in order, through a caller-supplied
//! [`Committer`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  transitions  ┌──────────────┐  commit   ┌─────────────┐
//! │ Connectivity │──────────────►│  SyncEngine  │──────────►│  Committer  │
//! │   Monitor    │               │   (drain)    │           │   (trait)   │
//! └──────────────┘               └──────────────┘           └─────────────┘
//!                                  │         │
//!                          snapshot│         │status
//!                                  ▼         ▼
//!                          ┌────────────┐ ┌────────────┐
//!                          │ QueueStore │ │   Counts   │
//!                          │  (trait)   │ │ QueueStatus│
//!                          └────────────┘ └────────────┘
//! ```

pub mod commit;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod id;
pub mod item;
pub mod protocol;
pub mod status;
pub mod store;

pub use commit::{commit_fn, CommitError, CommitFuture, CommitResult, Committer, FnCommitter};
pub use connectivity::{ConnectivityMonitor, Subscription};
pub use engine::{DrainReport, EngineConfig, SyncEngine};
pub use error::{Error, Result};
pub use item::{ItemState, Mutation, QueueItem, RawMutation};
pub use status::{counts, Counts, QueueStatus};
pub use store::{JsonFileStore, MemoryStore, QueueStore, StorageError, StorageResult};
