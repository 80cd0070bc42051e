//! Driving a plan tree to completion.
//!
//! [`Iterate`] runs the enumeration and backtracking protocol on a root
//! iterator and turns the outcome into a `Result`: a tree that stopped on a
//! fault reports the fault instead of a silent partial result.
//!
//! # Cancellation
//!
//! The context is checked before every advance. A run that observes
//! cancellation or an expired deadline returns
//! [`IteratorError::Cancelled`] or [`IteratorError::DeadlineExceeded`], never
//! a short successful result. Nodes that observe the context themselves follow
//! the same rule and report it through `err`.
//!
//! # Example
//!
//! ```
//! use trellis_query::error::IteratorError;
//! use trellis_query::exec::{ErrorValueIterator, Iterate, QueryContext};
//!
//! let ctx = QueryContext::new();
//! let mut it = ErrorValueIterator::new(IteratorError::backend("offline"));
//!
//! let outcome = Iterate::new(&ctx, &mut it).count();
//! assert_eq!(outcome, Err(IteratorError::backend("offline")));
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::QueryContext;
use super::iterator::{PlanIterator, TagMap};
use crate::error::IteratorResult;

/// Options for a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IterateConfig {
    /// Stop after this many results. Alternative paths count as results.
    pub limit: Option<usize>,
    /// Enumerate every alternative tag binding of each result.
    pub paths: bool,
}

impl IterateConfig {
    /// Creates a configuration with no limit and no path enumeration.
    #[must_use]
    pub const fn new() -> Self {
        Self { limit: None, paths: false }
    }

    /// Sets the result limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enables or disables path enumeration.
    #[must_use]
    pub const fn with_paths(mut self, paths: bool) -> Self {
        self.paths = paths;
        self
    }

    fn reached(&self, count: usize) -> bool {
        self.limit.is_some_and(|limit| count >= limit)
    }
}

/// A single run over a root iterator.
///
/// The run borrows the iterator and never closes it; the owner stays
/// responsible for calling [`close`](super::PlanNode::close).
pub struct Iterate<'a, I: PlanIterator + ?Sized> {
    ctx: &'a QueryContext,
    it: &'a mut I,
    config: IterateConfig,
}

impl<'a, I: PlanIterator + ?Sized> Iterate<'a, I> {
    /// Creates a run with the default configuration.
    pub fn new(ctx: &'a QueryContext, it: &'a mut I) -> Self {
        Self { ctx, it, config: IterateConfig::new() }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: IterateConfig) -> Self {
        self.config = config;
        self
    }

    /// Stops after `limit` results.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Enumerates alternative paths for every result.
    #[must_use]
    pub fn paths(mut self, paths: bool) -> Self {
        self.config.paths = paths;
        self
    }

    /// Calls `f` with every result.
    pub fn each(self, mut f: impl FnMut(&I::Item)) -> IteratorResult<()> {
        self.run(|it| {
            if let Some(result) = it.result() {
                f(result);
            }
        })
        .map(|_| ())
    }

    /// Calls `f` with the tag bindings of every result.
    ///
    /// Each call receives a fresh map holding the root's bindings.
    pub fn tag_each(self, mut f: impl FnMut(&TagMap<I::Item>)) -> IteratorResult<()> {
        self.run(|it| {
            let mut tags = TagMap::new();
            it.tag_results(&mut tags);
            f(&tags);
        })
        .map(|_| ())
    }

    /// Collects every result.
    pub fn all(self) -> IteratorResult<Vec<I::Item>> {
        let mut out = Vec::new();
        self.each(|result| out.push(result.clone()))?;
        Ok(out)
    }

    /// Counts results without collecting them.
    pub fn count(self) -> IteratorResult<usize> {
        self.run(|_| {})
    }

    /// Returns the first result, if any.
    ///
    /// A configured limit of zero still applies.
    pub fn first(self) -> IteratorResult<Option<I::Item>> {
        let limit = self.config.limit.map_or(1, |limit| limit.min(1));
        let mut first = None;
        self.limit(limit).each(|result| first = Some(result.clone()))?;
        Ok(first)
    }

    fn run(self, mut visit: impl FnMut(&I)) -> IteratorResult<usize> {
        let Self { ctx, it, config } = self;
        let started = Instant::now();
        let uid = it.uid();
        let mut count = 0usize;

        let outcome = drive(ctx, it, &config, &mut visit, &mut count).map(|()| count);
        match &outcome {
            Ok(_) => debug!(
                %uid,
                results = count,
                elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                "iteration finished"
            ),
            Err(err) => warn!(%uid, results = count, error = %err, "iteration stopped"),
        }
        outcome
    }
}

fn drive<I: PlanIterator + ?Sized>(
    ctx: &QueryContext,
    it: &mut I,
    config: &IterateConfig,
    visit: &mut impl FnMut(&I),
    count: &mut usize,
) -> IteratorResult<()> {
    'results: while !config.reached(*count) {
        ctx.check()?;
        if !it.next(ctx) {
            break;
        }
        visit(&*it);
        *count += 1;

        if !config.paths {
            continue;
        }
        while !config.reached(*count) {
            ctx.check()?;
            if !it.next_path(ctx) {
                continue 'results;
            }
            visit(&*it);
            *count += 1;
        }
        break;
    }

    match it.err() {
        Some(err) => Err(err.clone()),
        None => Ok(()),
    }
}
