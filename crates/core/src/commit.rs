// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Commit abstraction for applying queued mutations remotely.
//!
//! The engine knows nothing about the remote API; it hands each mutation to a
//! [`Committer`] and records the outcome. Production code plugs in a network
//! client, tests plug in closures via [`commit_fn`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Error type for commit attempts. Every variant is treated as transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    /// The remote refused the mutation.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The mutation could not be delivered.
    #[error("transport error: {0}")]
    Transport(String),

    /// No outcome arrived in time.
    #[error("commit timed out")]
    Timeout,
}

/// Result type for commit attempts.
pub type CommitResult<T> = Result<T, CommitError>;

/// Boxed future returned by [`Committer::commit`].
pub type CommitFuture<'a> = Pin<Box<dyn Future<Output = CommitResult<()>> + Send + 'a>>;

/// Applies one mutation to the remote backend.
pub trait Committer<M>: Send + Sync {
    /// Commits `mutation`. Resolves once the remote outcome is known.
    fn commit<'a>(&'a self, mutation: &'a M) -> CommitFuture<'a>;
}

/// Committer backed by an async closure.
pub struct FnCommitter<F> {
    f: F,
}

/// Wraps `f` as a [`Committer`]. The closure receives an owned clone of the
/// mutation.
pub fn commit_fn<F>(f: F) -> FnCommitter<F> {
    FnCommitter { f }
}

impl<M, F, Fut> Committer<M> for FnCommitter<F>
where
    M: Clone + Send + Sync,
    F: Fn(M) -> Fut + Send + Sync,
    Fut: Future<Output = CommitResult<()>> + Send + 'static,
{
    fn commit<'a>(&'a self, mutation: &'a M) -> CommitFuture<'a> {
        Box::pin((self.f)(mutation.clone()))
    }
}

impl<M, C: Committer<M> + ?Sized> Committer<M> for Box<C> {
    fn commit<'a>(&'a self, mutation: &'a M) -> CommitFuture<'a> {
        (**self).commit(mutation)
    }
}

impl<M, C: Committer<M> + ?Sized> Committer<M> for Arc<C> {
    fn commit<'a>(&'a self, mutation: &'a M) -> CommitFuture<'a> {
        (**self).commit(mutation)
    }
}

#[cfg(test)]
#[path = "commit_tests.rs"]
mod tests;
