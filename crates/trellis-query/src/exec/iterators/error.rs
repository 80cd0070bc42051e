//! The fail-fast iterator.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;
use trellis_core::{Ref, Value};

use crate::error::{IteratorError, IteratorResult};
use crate::exec::context::QueryContext;
use crate::exec::iterator::{
    Domain, DomainKind, IteratorBase, IteratorState, IteratorStats, PlanIterator, PlanNode, Size,
    TagMap,
};
use crate::exec::uid::{next_uid, Uid, UidSource};

/// An iterator that replays a failure captured at construction.
///
/// It yields nothing, just like [`NullIterator`](super::NullIterator), so
/// combinators handle it through the ordinary "no results" path. The failure
/// surfaces from [`err`](PlanNode::err) and again from
/// [`close`](PlanNode::close), so a caller who only checks `close` still
/// observes it. `size` and `next` do not distinguish this node from an empty
/// one; callers check `err` to tell them apart.
#[derive(Debug)]
pub struct ErrorIterator<T> {
    base: IteratorBase,
    err: IteratorError,
    _domain: PhantomData<T>,
}

/// A failed reference-domain node.
pub type ErrorRefIterator = ErrorIterator<Ref>;

/// A failed value-domain node.
pub type ErrorValueIterator = ErrorIterator<Value>;

impl<T: Domain> ErrorIterator<T> {
    /// Creates a failed iterator with an identity from the process-wide allocator.
    #[must_use]
    pub fn new(err: IteratorError) -> Self {
        Self::build(next_uid(), err)
    }

    /// Creates a failed iterator with an identity from `uids`.
    #[must_use]
    pub fn with_uids(uids: &dyn UidSource, err: IteratorError) -> Self {
        Self::build(uids.next_uid(), err)
    }

    fn build(uid: Uid, err: IteratorError) -> Self {
        debug!(%uid, error = %err, domain = ?T::KIND, "plan node carries construction failure");
        Self { base: IteratorBase::new(uid, IteratorState::Failed), err, _domain: PhantomData }
    }
}

impl<T: Domain> fmt::Display for ErrorIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error{}({})", T::KIND.label_suffix(), self.err)
    }
}

impl<T: Domain> PlanNode for ErrorIterator<T> {
    fn uid(&self) -> Uid {
        self.base.uid()
    }

    fn domain(&self) -> DomainKind {
        T::KIND
    }

    fn state(&self) -> IteratorState {
        self.base.state()
    }

    fn next_path(&mut self, _ctx: &QueryContext) -> bool {
        false
    }

    fn err(&self) -> Option<&IteratorError> {
        Some(&self.err)
    }

    fn sub_iterators(&self) -> Vec<&dyn PlanNode> {
        Vec::new()
    }

    fn size(&self) -> Size {
        Size::exact(0)
    }

    fn reset(&mut self) {
        self.base.reset();
    }

    fn close(&mut self) -> IteratorResult<()> {
        Err(self.err.clone())
    }

    fn stats(&self) -> IteratorStats {
        IteratorStats::empty()
    }
}

impl<T: Domain> PlanIterator for ErrorIterator<T> {
    type Item = T;

    fn tag_results(&self, _dst: &mut TagMap<T>) {}

    fn contains(&mut self, _ctx: &QueryContext, _candidate: &T) -> bool {
        false
    }

    fn next(&mut self, _ctx: &QueryContext) -> bool {
        false
    }

    fn result(&self) -> Option<&T> {
        None
    }
}
