// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::item::RawMutation;
use serde_json::json;
use yare::parameterized;

#[tokio::test]
async fn commit_fn_passes_mutation_and_outcome() {
    let committer = commit_fn(|m: RawMutation| async move {
        if m.payload["ok"] == true {
            Ok(())
        } else {
            Err(CommitError::Rejected(m.action))
        }
    });

    let ok = RawMutation::new("save", json!({"ok": true}));
    let bad = RawMutation::new("save", json!({"ok": false}));

    assert_eq!(committer.commit(&ok).await, Ok(()));
    assert_eq!(
        committer.commit(&bad).await,
        Err(CommitError::Rejected("save".into()))
    );
}

#[parameterized(
    rejected = { CommitError::Rejected("conflict".into()), "rejected: conflict" },
    transport = { CommitError::Transport("reset".into()), "transport error: reset" },
    timeout = { CommitError::Timeout, "commit timed out" },
)]
fn commit_error_display(err: CommitError, expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[tokio::test]
async fn boxed_and_shared_committers_delegate() {
    let boxed: Box<dyn Committer<RawMutation>> = Box::new(commit_fn(|_m: RawMutation| async {
        Err::<(), _>(CommitError::Timeout)
    }));
    let shared = std::sync::Arc::new(commit_fn(|_m: RawMutation| async {
        Ok::<(), CommitError>(())
    }));
    let m = RawMutation::new("save", json!(null));

    assert_eq!(boxed.commit(&m).await, Err(CommitError::Timeout));
    assert_eq!(shared.commit(&m).await, Ok(()));
}
