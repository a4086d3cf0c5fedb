// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages for committing queued mutations.
//!
//! The protocol is request/response:
//! - Client sends one `commit` per mutation, tagged with a request number
//! - Server answers each with `ack` or `reject` carrying the same number

use serde::{Deserialize, Serialize};

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Apply one mutation.
    Commit {
        /// Client-chosen number echoed in the answer.
        request: u64,
        action: String,
        #[serde(default)]
        payload: serde_json::Value,
    },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The mutation was applied.
    Ack { request: u64 },

    /// The mutation was refused.
    Reject { request: u64, reason: String },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error message for frames the server could not handle.
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates a Commit message.
    pub fn commit(request: u64, action: impl Into<String>, payload: serde_json::Value) -> Self {
        ClientMessage::Commit {
            request,
            action: action.into(),
            payload,
        }
    }

    /// Creates a Ping message.
    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates an Ack message.
    pub fn ack(request: u64) -> Self {
        ServerMessage::Ack { request }
    }

    /// Creates a Reject message.
    pub fn reject(request: u64, reason: impl Into<String>) -> Self {
        ServerMessage::Reject {
            request,
            reason: reason.into(),
        }
    }

    /// Creates a Pong message.
    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    /// Creates an Error message.
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Request number this message answers, if any.
    pub fn request(&self) -> Option<u64> {
        match self {
            ServerMessage::Ack { request } | ServerMessage::Reject { request, .. } => Some(*request),
            ServerMessage::Pong { .. } | ServerMessage::Error { .. } => None,
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
