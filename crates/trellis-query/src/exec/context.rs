//! Cancellation and deadlines for query execution.
//!
//! A [`QueryContext`] is threaded by reference through every call that may
//! suspend: `next`, `next_path` and `contains`. Cancellation is cooperative.
//! Nodes that scan without bound poll the context at safe points; nodes that
//! finish in constant time may ignore it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{IteratorError, IteratorResult};

/// A handle for cancelling query execution.
///
/// Can be shared between threads to allow cancellation from outside
/// the query execution thread.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self { cancelled: Arc::new(AtomicBool::new(false)) }
    }

    /// Cancels the associated query.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks if cancellation was requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-query execution context.
///
/// Carries a [`CancellationToken`] and an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Shared cancellation flag.
    token: CancellationToken,
    /// Point in time after which the query counts as expired.
    deadline: Option<Instant>,
}

impl QueryContext {
    /// Creates a context that is never cancelled on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context observing an existing token.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self { token, deadline: None }
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline `timeout` from now.
    ///
    /// A timeout too large to represent leaves the context without a deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Returns the cancellation token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels the query.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Checks if the query has been cancelled.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Checks if the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns true if the query should stop for either reason.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }

    /// Returns the error a node should report if it stops here.
    ///
    /// Explicit cancellation takes precedence over an expired deadline.
    pub fn check(&self) -> IteratorResult<()> {
        if self.is_cancelled() {
            Err(IteratorError::Cancelled)
        } else if self.is_expired() {
            Err(IteratorError::DeadlineExceeded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_token() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());

        let token2 = token.clone();
        token.cancel();

        assert!(token.is_cancelled());
        assert!(token2.is_cancelled());
    }

    #[test]
    fn context_cancellation() {
        let ctx = QueryContext::new();
        assert!(ctx.check().is_ok());
        ctx.cancel();
        assert!(ctx.is_cancelled());
        assert_eq!(ctx.check(), Err(IteratorError::Cancelled));
    }

    #[test]
    fn cloned_context_shares_token() {
        let ctx = QueryContext::new();
        let child = ctx.clone();
        ctx.cancel();
        assert!(child.is_done());
    }

    #[test]
    fn external_token_cancels_context() {
        let token = CancellationToken::new();
        let ctx = QueryContext::with_token(token.clone());
        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn past_deadline_is_expired() {
        let ctx = QueryContext::new().with_deadline(Instant::now());
        assert!(ctx.is_expired());
        assert_eq!(ctx.check(), Err(IteratorError::DeadlineExceeded));
    }

    #[test]
    fn cancellation_wins_over_deadline() {
        let ctx = QueryContext::new().with_deadline(Instant::now());
        ctx.cancel();
        assert_eq!(ctx.check(), Err(IteratorError::Cancelled));
    }

    #[test]
    fn generous_timeout_is_not_expired() {
        let ctx = QueryContext::new().with_timeout(Duration::from_secs(3600));
        assert!(ctx.deadline().is_some());
        assert!(!ctx.is_expired());
    }
}
