// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Relay connection for the CLI.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ SyncEngine  │────►│  Committer  │────►│  Transport  │────► outbox-remote
//! └─────────────┘     │  (Remote)   │◄────│   (trait)   │◄────
//!        ▲            └─────────────┘     └─────────────┘
//!        │
//! ┌─────────────┐
//! │  TcpProbe   │  (feeds the connectivity monitor)
//! └─────────────┘
//! ```

mod committer;
mod probe;
mod transport;

pub use committer::{RemoteCommitter, WebSocketCommitter};
pub use probe::{socket_addr, TcpProbe};
pub use transport::{Transport, TransportError, WebSocketTransport};
