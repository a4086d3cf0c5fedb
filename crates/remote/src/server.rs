// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Each connection is served by its own task; commits from one connection
//! are answered in the order they arrive.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use outbox_core::protocol::{ClientMessage, ServerMessage};

use crate::state::{CommitOutcome, RelayState};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: RelayState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", addr);
    serve(listener, state)
        .await
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    Ok(())
}

/// Accepts connections on `listener` until accepting fails.
pub(crate) async fn serve(listener: TcpListener, state: RelayState) -> Result<(), BoxError> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                debug!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: RelayState,
) -> Result<(), BoxError> {
    // Reachability probes connect and close without a handshake.
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!("New WebSocket connection from: {}", peer_addr);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();

    loop {
        match ws_stream.next().await {
            Some(Ok(Message::Text(text))) => {
                let response = handle_client_message(&text, &state).await;
                let json = response.to_json()?;
                if let Err(e) = ws_sink.send(Message::Text(json.into())).await {
                    warn!("Failed to answer {}: {}", peer_addr, e);
                    break;
                }
            }
            Some(Ok(Message::Close(_))) => {
                info!("Client {} disconnected", peer_addr);
                break;
            }
            Some(Ok(Message::Ping(data))) => {
                ws_sink.send(Message::Pong(data)).await?;
            }
            Some(Ok(_)) => {
                // Ignore other message types (Binary, Pong, Frame)
            }
            Some(Err(e)) => {
                error!("WebSocket error from {}: {}", peer_addr, e);
                break;
            }
            None => {
                info!("Client {} stream ended", peer_addr);
                break;
            }
        }
    }

    info!("Connection closed: {}", peer_addr);
    Ok(())
}

/// Process one client frame and build the answer.
pub(crate) async fn handle_client_message(text: &str, state: &RelayState) -> ServerMessage {
    let msg = match ClientMessage::from_json(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Malformed frame: {}", e);
            return ServerMessage::error(format!("malformed frame: {}", e));
        }
    };
    debug!("Received message: {:?}", msg);

    match msg {
        ClientMessage::Commit {
            request,
            action,
            payload,
        } => match state.commit(action.clone(), payload).await {
            Ok(CommitOutcome::Accepted(seq)) => {
                debug!(request, seq, action = %action, "commit recorded");
                ServerMessage::ack(request)
            }
            Ok(CommitOutcome::Rejected(reason)) => {
                info!(request, action = %action, "commit rejected: {}", reason);
                ServerMessage::reject(request, reason)
            }
            Err(e) => {
                error!(request, "failed to record commit: {}", e);
                ServerMessage::reject(request, format!("storage error: {}", e))
            }
        },

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            ServerMessage::pong(id)
        }
    }
}
