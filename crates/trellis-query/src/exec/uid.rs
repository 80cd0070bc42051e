//! Identity allocation for plan nodes.
//!
//! Every iterator receives a [`Uid`] when it is constructed. Planners and
//! loggers use it to refer to a node without comparing trees structurally.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique identity of a plan node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(u64);

impl Uid {
    /// Creates a `Uid` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A source of node identities.
///
/// Constructors take a `&dyn UidSource` so tests can hand each case a fresh
/// counter instead of sharing the process-wide one.
pub trait UidSource: Send + Sync {
    /// Returns an identity never returned before by this source.
    fn next_uid(&self) -> Uid;
}

/// A monotonic identity allocator.
///
/// Thread-safe; every call returns a value strictly greater than any value
/// previously returned. A fresh allocator starts at 0. Wraparound at
/// `u64::MAX` is not handled.
///
/// # Example
///
/// ```
/// use trellis_query::exec::{UidAllocator, UidSource};
///
/// let uids = UidAllocator::new();
/// let a = uids.next_uid();
/// let b = uids.next_uid();
/// assert_eq!(a.as_u64(), 0);
/// assert!(a < b);
/// ```
#[derive(Debug)]
pub struct UidAllocator {
    /// The next identity to hand out.
    next: AtomicU64,
}

impl UidAllocator {
    /// Creates an allocator starting from 0.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_start(0)
    }

    /// Creates an allocator whose first identity is `start`.
    #[must_use]
    pub const fn with_start(start: u64) -> Self {
        Self { next: AtomicU64::new(start) }
    }

    /// Returns the identity the next call will hand out.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for UidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl UidSource for UidAllocator {
    fn next_uid(&self) -> Uid {
        Uid(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

static GLOBAL: UidAllocator = UidAllocator::new();

/// Returns the process-wide allocator used by default constructors.
#[must_use]
pub fn global_allocator() -> &'static UidAllocator {
    &GLOBAL
}

/// Allocates an identity from the process-wide allocator.
#[must_use]
pub fn next_uid() -> Uid {
    GLOBAL.next_uid()
}
