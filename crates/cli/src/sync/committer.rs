// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Committer that delivers mutations to an outbox relay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use outbox_core::protocol::{ClientMessage, ServerMessage};
use outbox_core::{CommitError, CommitFuture, CommitResult, Committer, Mutation};
use tokio::sync::Mutex;

use super::transport::{Transport, WebSocketTransport};

/// [`RemoteCommitter`] over a real WebSocket.
pub type WebSocketCommitter = RemoteCommitter<WebSocketTransport>;

/// Sends each mutation as a `commit` frame and waits for its answer.
///
/// One connection is kept open across commits. A broken or timed-out
/// connection is dropped and re-established on the next commit.
pub struct RemoteCommitter<T> {
    url: String,
    timeout: Duration,
    transport: Mutex<T>,
    next_request: AtomicU64,
}

impl WebSocketCommitter {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_transport(url, timeout, WebSocketTransport::new())
    }
}

impl<T: Transport> RemoteCommitter<T> {
    pub fn with_transport(url: impl Into<String>, timeout: Duration, transport: T) -> Self {
        RemoteCommitter {
            url: url.into(),
            timeout,
            transport: Mutex::new(transport),
            next_request: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn deliver(&self, msg: ClientMessage, request: u64) -> CommitResult<()> {
        let mut transport = self.transport.lock().await;

        if !transport.is_connected() {
            match tokio::time::timeout(self.timeout, transport.connect(&self.url)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(CommitError::Transport(e.to_string())),
                Err(_) => return Err(CommitError::Timeout),
            }
        }

        transport
            .send(msg)
            .await
            .map_err(|e| CommitError::Transport(e.to_string()))?;

        match tokio::time::timeout(self.timeout, await_outcome(&mut *transport, request)).await {
            Ok(outcome) => {
                if matches!(outcome, Err(CommitError::Transport(_))) {
                    let _ = transport.disconnect().await;
                }
                outcome
            }
            Err(_) => {
                // A late answer would be mistaken for the next request's.
                let _ = transport.disconnect().await;
                Err(CommitError::Timeout)
            }
        }
    }
}

async fn await_outcome<T: Transport + ?Sized>(transport: &mut T, request: u64) -> CommitResult<()> {
    loop {
        let msg = match transport.recv().await {
            Ok(Some(msg)) => msg,
            Ok(None) => return Err(CommitError::Transport("connection closed".into())),
            Err(e) => return Err(CommitError::Transport(e.to_string())),
        };
        match msg {
            ServerMessage::Ack { request: r } if r == request => return Ok(()),
            ServerMessage::Reject { request: r, reason } if r == request => {
                return Err(CommitError::Rejected(reason));
            }
            ServerMessage::Error { message } => return Err(CommitError::Rejected(message)),
            other => tracing::debug!(?other, request, "ignoring unrelated frame"),
        }
    }
}

impl<M: Mutation, T: Transport> Committer<M> for RemoteCommitter<T> {
    fn commit<'a>(&'a self, mutation: &'a M) -> CommitFuture<'a> {
        Box::pin(async move {
            let payload = payload_of(mutation)?;
            let request = self.next_request.fetch_add(1, Ordering::Relaxed);
            let msg = ClientMessage::commit(request, mutation.action(), payload);
            self.deliver(msg, request).await
        })
    }
}

/// The `payload` half of a mutation's serialized form.
fn payload_of<M: Mutation>(mutation: &M) -> CommitResult<serde_json::Value> {
    let mut value =
        serde_json::to_value(mutation).map_err(|e| CommitError::Rejected(e.to_string()))?;
    Ok(value
        .get_mut("payload")
        .map(serde_json::Value::take)
        .unwrap_or(serde_json::Value::Null))
}

#[cfg(test)]
#[path = "committer_tests.rs"]
mod tests;
