//! Trellis Query
//!
//! The execution primitive of the trellis graph-query engine: the iterator
//! contract that every plan node implements, plus the pieces needed to build
//! and drive plan trees over it.
//!
//! # Overview
//!
//! A query planner compiles a query into a tree of iterators. Each node
//! implements [`PlanIterator`] for one of two value domains:
//!
//! - [`Ref`](trellis_core::Ref): opaque backend references, cheap to intersect
//! - [`Value`](trellis_core::Value): decoded values, needed for literal comparisons
//!
//! Leaves and combinators alike are driven through the same protocol:
//! `next` advances the primary cursor, `next_path` enumerates alternative
//! tag bindings for the current result, and `contains` probes membership
//! without moving the cursor.
//!
//! # Example
//!
//! ```
//! use trellis_query::exec::{Iterate, NullRefIterator, PlanNode, QueryContext};
//!
//! let ctx = QueryContext::new();
//! let mut it = NullRefIterator::new();
//!
//! let results = Iterate::new(&ctx, &mut it).all().unwrap();
//! assert!(results.is_empty());
//! assert!(it.size().is_exact_zero());
//! ```
//!
//! # Modules
//!
//! - [`exec`] - The iterator contract, degenerate iterators, and the driver
//! - [`error`] - Error types ([`IteratorError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod exec;

pub use error::{IteratorError, IteratorResult};
pub use exec::{Domain, DomainKind, PlanIterator, PlanNode, QueryContext, Uid};
