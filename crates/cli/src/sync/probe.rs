// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Host reachability probe feeding a [`ConnectivityMonitor`].

use std::time::Duration;

use outbox_core::ConnectivityMonitor;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::http::Uri;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Treats the relay as reachable when a TCP connect to it succeeds.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
    interval: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration, interval: Duration) -> Self {
        TcpProbe {
            addr: addr.into(),
            timeout,
            interval,
        }
    }

    /// Probe for the host and port of a `ws://` or `wss://` URL.
    pub fn for_url(url: &str, timeout: Duration, interval: Duration) -> Result<Self> {
        Ok(Self::new(socket_addr(url)?, timeout, interval))
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Single reachability check.
    pub async fn check(&self) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!(addr = %self.addr, "probe failed: {}", e);
                false
            }
            Err(_) => {
                tracing::debug!(addr = %self.addr, "probe timed out");
                false
            }
        }
    }

    /// Checks once and reports the result to `monitor`.
    pub async fn update(&self, monitor: &ConnectivityMonitor) -> bool {
        let online = self.check().await;
        monitor.set_online(online);
        online
    }

    /// Reports reachability every interval until `shutdown` is cancelled.
    pub async fn run(&self, monitor: ConnectivityMonitor, shutdown: CancellationToken) {
        loop {
            self.update(&monitor).await;
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}

/// `host:port` of a WebSocket URL, with the scheme's default port.
pub fn socket_addr(url: &str) -> Result<String> {
    let invalid = || Error::InvalidRemoteUrl(url.to_string());
    let uri: Uri = url.parse().map_err(|_| invalid())?;
    let default_port = match uri.scheme_str() {
        Some("ws") => 80,
        Some("wss") => 443,
        _ => return Err(invalid()),
    };
    let host = uri.host().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    let port = uri.port_u16().unwrap_or(default_port);
    Ok(format!("{host}:{port}"))
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
