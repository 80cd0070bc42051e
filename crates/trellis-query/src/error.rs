//! Error types for query execution.

use thiserror::Error;
use trellis_core::CoreError;

/// Result type for iterator operations.
pub type IteratorResult<T> = Result<T, IteratorError>;

/// A terminal fault that stopped an iterator.
///
/// Exhaustion is not an error: an iterator that simply ran out of results
/// reports `None` from [`err`](crate::exec::PlanNode::err). Errors are cloneable
/// because a failed iterator hands out the same fault from both `err` and
/// `close` for the rest of its life.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IteratorError {
    /// The storage backend failed to produce references or values.
    #[error("backend error: {0}")]
    Backend(String),

    /// The query was cancelled through its context.
    #[error("query cancelled")]
    Cancelled,

    /// The query ran past its deadline.
    #[error("query deadline exceeded")]
    DeadlineExceeded,

    /// Releasing an iterator's resources failed.
    #[error("failed to release iterator resources: {0}")]
    Release(String),

    /// A core value error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl IteratorError {
    /// Creates a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Returns true if the iterator stopped early because its context fired,
    /// rather than because the data or backend failed.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
