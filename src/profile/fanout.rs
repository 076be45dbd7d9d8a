//! Fan-out helpers: every branch settles to `Option<T>`, so one branch failing or
//! running out of time never reaches its siblings or the caller.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};

/// `Some(value)` on success; logs and returns `None` on failure.
pub fn settled<T, E: Display>(branch: &'static str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(branch, %err, "branch failed; section omitted");
            None
        }
    }
}

/// Shared deadline for all branches of one assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline: every branch runs to completion.
    pub fn unbounded() -> Self {
        Self { at: None }
    }

    pub fn after(budget: Option<Duration>) -> Self {
        Self {
            at: budget.map(|b| Instant::now() + b),
        }
    }

    /// Awaits `branch` until it settles or the deadline passes; a branch still
    /// pending at the deadline is dropped and counts as failed.
    pub async fn settle<T, F>(&self, branch: &'static str, fut: F) -> Option<T>
    where
        F: Future<Output = Option<T>>,
    {
        match self.at {
            None => fut.await,
            Some(at) => match timeout_at(at, fut).await {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(branch, "branch missed the request deadline; section omitted");
                    None
                }
            },
        }
    }
}
