// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use outbox_core::{DrainReport, ItemState, QueueItem, QueueStatus};

use crate::colors;

/// Longest payload preview shown in item lines.
const PAYLOAD_WIDTH: usize = 48;

/// Format a queue item as a single line.
///
/// `- [failed] create_post (sync-1718000000000-a1b2c3d4) {"id":7}  attempts: 2, last error: rejected: quota`
pub fn format_item_line(item: &QueueItem) -> String {
    let mut line = format!(
        "- [{}] {} ({})",
        colors::state(item.state),
        item.action(),
        colors::context(&item.id)
    );
    if !item.mutation.payload.is_null() {
        line.push(' ');
        line.push_str(&truncate(&item.mutation.payload.to_string(), PAYLOAD_WIDTH));
    }
    if item.attempts > 0 && item.state != ItemState::Synced {
        line.push_str(&format!("  attempts: {}", item.attempts));
        if let Some(err) = &item.last_error {
            line.push_str(&format!(", last error: {}", err));
        }
    }
    line
}

/// Truncate to `width` characters, marking the cut with `...`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Multi-line status block for `outbox status`.
pub fn format_status(status: &QueueStatus, remote: Option<&str>) -> String {
    let counts = status.counts;
    let mut lines = vec![format!(
        "{} {} items ({} outstanding)",
        colors::header("Queue:"),
        counts.total(),
        counts.outstanding()
    )];
    for state in ItemState::ALL {
        lines.push(format!("  {}: {}", state, counts.get(state)));
    }
    if status.exhausted > 0 {
        lines.push(format!(
            "  {} failed items reached the retry limit",
            status.exhausted
        ));
    }
    if status.unsaved {
        lines.push("  warning: queue changes are not yet saved to disk".to_string());
    }

    let remote_line = match remote {
        Some(url) => format!(
            "{} {} ({})",
            colors::header("Remote:"),
            url,
            if status.online { "online" } else { "offline" }
        ),
        None => format!("{} none (local only)", colors::header("Remote:")),
    };
    lines.push(remote_line);
    lines.join("\n")
}

/// One-line status summary printed by `outbox watch` on every change.
pub fn format_status_line(status: &QueueStatus) -> String {
    let c = status.counts;
    let mut line = format!(
        "pending {}, syncing {}, synced {}, failed {} ({})",
        c.pending,
        c.syncing,
        c.synced,
        c.failed,
        if status.online { "online" } else { "offline" }
    );
    if status.draining {
        line.push_str(" draining");
    }
    line
}

/// Summary of one drain pass.
pub fn format_drain_report(report: &DrainReport) -> String {
    let mut text = if report.attempted == 0 {
        "Nothing to sync".to_string()
    } else {
        format!("Synced {}, failed {}", report.synced, report.failed)
    };
    if report.stopped_offline {
        text.push_str(" (connection lost, remaining items left queued)");
    }
    text
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
