//! The iterator contract and its shared types.
//!
//! This module defines [`PlanNode`] and [`PlanIterator`], which every node of
//! a query plan implements, leaf or combinator.
//!
//! # Protocol
//!
//! A consumer drives a node with two cursors:
//!
//! 1. **Primary cursor**: [`next`](PlanIterator::next) moves to the next result.
//!    Once it returns `false` the node is exhausted and every further call also
//!    returns `false` without side effects.
//! 2. **Backtracking cursor**: [`next_path`](PlanNode::next_path) keeps the
//!    current result fixed and moves to the next alternative set of tag
//!    bindings that reaches it.
//!
//! [`contains`](PlanIterator::contains) probes membership independently of
//! both cursors, so an intersection can drive its cheapest child with `next`
//! and check the others with `contains`.
//!
//! After `next` returns `false`, [`err`](PlanNode::err) tells clean
//! exhaustion (`None`) apart from a terminal fault (`Some`).
//!
//! # Domains
//!
//! The contract is written once and instantiated for two value domains via
//! [`PlanIterator::Item`]: opaque backend [`Ref`]s and decoded [`Value`]s.
//! Combinators that only intersect identities never pay for decoding values.
//!
//! # Thread Safety
//!
//! Nodes are `Send` so a plan can move between threads, but a single node is
//! never driven from two callers at once; every method that moves a cursor
//! takes `&mut self`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use trellis_core::{Ref, Value};

use super::context::QueryContext;
use super::uid::Uid;
use crate::error::{IteratorError, IteratorResult};

/// The kind of value a node enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    /// Opaque backend references.
    Ref,
    /// Decoded values.
    Value,
}

impl DomainKind {
    /// Suffix appended to debug labels of value-domain nodes (`Null` vs `NullV`).
    #[must_use]
    pub const fn label_suffix(self) -> &'static str {
        match self {
            Self::Ref => "",
            Self::Value => "V",
        }
    }
}

/// A value domain that iterators can enumerate.
pub trait Domain: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Which domain this is.
    const KIND: DomainKind;
}

impl Domain for Ref {
    const KIND: DomainKind = DomainKind::Ref;
}

impl Domain for Value {
    const KIND: DomainKind = DomainKind::Value;
}

/// Tag bindings accumulated while walking a plan tree.
///
/// The map is owned by the caller. Nodes only add to it.
pub type TagMap<T> = HashMap<String, T>;

/// A cardinality estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Estimated number of results.
    pub value: i64,
    /// Whether `value` is guaranteed rather than estimated.
    pub exact: bool,
}

impl Size {
    /// An exact size.
    #[must_use]
    pub const fn exact(value: i64) -> Self {
        Self { value, exact: true }
    }

    /// A planner estimate.
    #[must_use]
    pub const fn estimate(value: i64) -> Self {
        Self { value, exact: false }
    }

    /// Returns true if the size is known to be exactly zero.
    #[must_use]
    pub const fn is_exact_zero(self) -> bool {
        self.exact && self.value == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exact {
            write!(f, "{}", self.value)
        } else {
            write!(f, "~{}", self.value)
        }
    }
}

/// Planner-facing cost and size estimates for driving a node to completion.
///
/// Costs are relative units, comparable only between nodes of one plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IteratorStats {
    /// Cost of a single `contains` probe.
    pub contains_cost: i64,
    /// Cost of a single `next` step.
    pub next_cost: i64,
    /// Cardinality estimate.
    pub size: Size,
    /// Number of `next` calls made so far.
    pub next: i64,
    /// Number of `contains` calls made so far.
    pub contains: i64,
    /// Number of `contains` calls that answered `true`.
    pub contains_next: i64,
}

impl IteratorStats {
    /// Stats for a node that is known to be empty and costs nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            contains_cost: 0,
            next_cost: 0,
            size: Size::exact(0),
            next: 0,
            contains: 0,
            contains_next: 0,
        }
    }

    /// Estimated cost of enumerating every result with `next`.
    #[must_use]
    pub const fn full_scan_cost(&self) -> i64 {
        self.next_cost.saturating_mul(self.size.value)
    }
}

/// The cursor state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IteratorState {
    /// Constructed or reset; `next` has not been called.
    Unstarted,
    /// `next` or `next_path` produced a result.
    Positioned,
    /// `next` returned `false` with no error.
    Exhausted,
    /// A terminal error stopped the node.
    Failed,
}

impl IteratorState {
    /// Returns true if the node will never produce another result.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed)
    }

    /// Returns true if `result` is meaningful.
    #[must_use]
    pub const fn is_positioned(self) -> bool {
        matches!(self, Self::Positioned)
    }
}

/// The domain-independent half of the iterator contract.
///
/// This is what [`sub_iterators`](Self::sub_iterators) returns, so planners
/// can walk a tree whose children enumerate different domains.
///
/// [`fmt::Display`] is the node's debug label. It is stable for a node but
/// is not an equality or cache key.
pub trait PlanNode: fmt::Display + Send {
    /// Returns the identity assigned at construction.
    fn uid(&self) -> Uid;

    /// Returns which value domain this node enumerates.
    fn domain(&self) -> DomainKind;

    /// Returns the current cursor state.
    fn state(&self) -> IteratorState;

    /// Advances to the next alternative tag binding for the current result.
    ///
    /// Does not move the primary cursor. Returns `false` when no further
    /// alternatives exist, or when `ctx` has fired.
    fn next_path(&mut self, ctx: &QueryContext) -> bool;

    /// Returns the terminal error, or `None` for clean exhaustion.
    ///
    /// Once `Some`, the same error is returned for the rest of the node's life.
    fn err(&self) -> Option<&IteratorError>;

    /// Returns the immediate children. Empty for leaves.
    fn sub_iterators(&self) -> Vec<&dyn PlanNode>;

    /// Returns the cardinality estimate.
    fn size(&self) -> Size;

    /// Rewinds every cursor to unstarted without releasing resources.
    ///
    /// Callable in any state, including after exhaustion or failure.
    fn reset(&mut self);

    /// Releases resources owned exclusively by this node.
    ///
    /// Idempotent: a second call is a no-op. A node that already carries a
    /// terminal error returns that error.
    fn close(&mut self) -> IteratorResult<()>;

    /// Returns cost and size estimates without enumerating.
    fn stats(&self) -> IteratorStats;
}

/// The domain-typed half of the iterator contract.
pub trait PlanIterator: PlanNode {
    /// The value domain this node enumerates.
    type Item: Domain;

    /// Writes this node's own tag bindings into `dst`.
    ///
    /// Additive: entries already present in `dst` are never removed.
    fn tag_results(&self, dst: &mut TagMap<Self::Item>);

    /// Tests whether `candidate` is one of this node's results.
    ///
    /// Independent of the primary cursor and repeatable: the same input gives
    /// the same answer while the underlying data is unchanged.
    fn contains(&mut self, ctx: &QueryContext, candidate: &Self::Item) -> bool;

    /// Advances the primary cursor.
    ///
    /// Returns `false` on exhaustion or when `ctx` fires. Once `false` has been
    /// returned, every later call also returns `false`.
    fn next(&mut self, ctx: &QueryContext) -> bool;

    /// Returns the value at the primary cursor.
    ///
    /// Meaningless before the first successful `next` and after exhaustion.
    fn result(&self) -> Option<&Self::Item>;
}

/// A boxed iterator for dynamic dispatch.
pub type BoxedIterator<T> = Box<dyn PlanIterator<Item = T>>;

/// A boxed reference-domain iterator.
pub type BoxedRefIterator = BoxedIterator<Ref>;

/// A boxed value-domain iterator.
pub type BoxedValueIterator = BoxedIterator<Value>;

/// A plan rewrite that replaces one node with another.
pub type Morphism<T> = Box<dyn FnOnce(BoxedIterator<T>) -> BoxedIterator<T> + Send>;

/// Applies `morphisms` to `it` in order.
#[must_use]
pub fn apply_morphisms<T: Domain>(
    it: BoxedIterator<T>,
    morphisms: impl IntoIterator<Item = Morphism<T>>,
) -> BoxedIterator<T> {
    morphisms.into_iter().fold(it, |it, morphism| morphism(it))
}

/// Common per-node bookkeeping.
///
/// Nodes embed this to carry their identity and cursor state.
#[derive(Debug)]
pub struct IteratorBase {
    /// Identity assigned at construction.
    uid: Uid,
    /// The current cursor state.
    state: IteratorState,
    /// Number of results produced since the last reset.
    produced: u64,
}

impl IteratorBase {
    /// Creates a base in the given state.
    #[must_use]
    pub const fn new(uid: Uid, state: IteratorState) -> Self {
        Self { uid, state, produced: 0 }
    }

    /// Returns the identity.
    #[must_use]
    pub const fn uid(&self) -> Uid {
        self.uid
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> IteratorState {
        self.state
    }

    /// Records that a result was produced.
    pub fn set_positioned(&mut self) {
        self.state = IteratorState::Positioned;
        self.produced += 1;
    }

    /// Marks the cursor exhausted.
    pub fn set_exhausted(&mut self) {
        self.state = IteratorState::Exhausted;
    }

    /// Marks the node failed.
    pub fn set_failed(&mut self) {
        self.state = IteratorState::Failed;
    }

    /// Rewinds to unstarted unless the node has failed.
    ///
    /// Failure is absorbing: a reset never clears it.
    pub fn reset(&mut self) {
        if self.state != IteratorState::Failed {
            self.state = IteratorState::Unstarted;
        }
        self.produced = 0;
    }

    /// Returns the number of results produced since the last reset.
    #[must_use]
    pub const fn produced(&self) -> u64 {
        self.produced
    }
}
