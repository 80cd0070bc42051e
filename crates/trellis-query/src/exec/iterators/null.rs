//! The empty-set iterator.

use std::fmt;
use std::marker::PhantomData;

use trellis_core::{Ref, Value};

use crate::error::{IteratorError, IteratorResult};
use crate::exec::context::QueryContext;
use crate::exec::iterator::{
    Domain, DomainKind, IteratorState, IteratorStats, PlanIterator, PlanNode, Size, TagMap,
};
use crate::exec::uid::{next_uid, Uid, UidSource};

/// An iterator over the empty set.
///
/// Planners substitute this node wherever analysis proves a branch cannot
/// match, such as an empty fixed set or a contradictory filter. Its size is an
/// exact zero because emptiness is known by construction, so the branch costs
/// nothing to execute.
#[derive(Debug)]
pub struct NullIterator<T> {
    uid: Uid,
    _domain: PhantomData<T>,
}

/// The empty set of references.
pub type NullRefIterator = NullIterator<Ref>;

/// The empty set of values.
pub type NullValueIterator = NullIterator<Value>;

impl<T: Domain> NullIterator<T> {
    /// Creates an empty iterator with an identity from the process-wide allocator.
    #[must_use]
    pub fn new() -> Self {
        Self { uid: next_uid(), _domain: PhantomData }
    }

    /// Creates an empty iterator with an identity from `uids`.
    #[must_use]
    pub fn with_uids(uids: &dyn UidSource) -> Self {
        Self { uid: uids.next_uid(), _domain: PhantomData }
    }
}

impl<T: Domain> Default for NullIterator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Domain> fmt::Display for NullIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Null{}", T::KIND.label_suffix())
    }
}

impl<T: Domain> PlanNode for NullIterator<T> {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn domain(&self) -> DomainKind {
        T::KIND
    }

    fn state(&self) -> IteratorState {
        IteratorState::Exhausted
    }

    fn next_path(&mut self, _ctx: &QueryContext) -> bool {
        false
    }

    fn err(&self) -> Option<&IteratorError> {
        None
    }

    fn sub_iterators(&self) -> Vec<&dyn PlanNode> {
        Vec::new()
    }

    fn size(&self) -> Size {
        Size::exact(0)
    }

    fn reset(&mut self) {}

    fn close(&mut self) -> IteratorResult<()> {
        Ok(())
    }

    // A null iterator costs nothing.
    fn stats(&self) -> IteratorStats {
        IteratorStats::empty()
    }
}

impl<T: Domain> PlanIterator for NullIterator<T> {
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
