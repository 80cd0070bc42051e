//! Query execution over plan trees.
//!
//! - [`uid`] - Process-wide identity allocation for plan nodes
//! - [`context`] - Cancellation and deadlines
//! - [`iterator`] - The [`PlanNode`] / [`PlanIterator`] contract
//! - [`tagger`] - Tag bookkeeping shared by combinators
//! - [`iterators`] - The empty-set and fail-fast iterators
//! - [`describe`] - Serializable plan-tree descriptions
//! - [`iterate`] - Driving a root iterator to completion

pub mod context;
pub mod describe;
pub mod iterate;
pub mod iterator;
pub mod iterators;
pub mod tagger;
pub mod uid;


pub use context::{CancellationToken, QueryContext};
pub use describe::{describe, Description};
pub use iterate::{Iterate, IterateConfig};
pub use iterator::{
    apply_morphisms, BoxedIterator, BoxedRefIterator, BoxedValueIterator, Domain, DomainKind,
    IteratorBase, IteratorState, IteratorStats, Morphism, PlanIterator, PlanNode, Size, TagMap,
};
pub use iterators::{
    ErrorIterator, ErrorRefIterator, ErrorValueIterator, NullIterator, NullRefIterator,
    NullValueIterator,
};
pub use tagger::Tagger;
pub use uid::{global_allocator, next_uid, Uid, UidAllocator, UidSource};
