//! Test plan nodes built only on the public iterator contract.

#![allow(dead_code)]

use std::fmt;

use trellis_query::error::{IteratorError, IteratorResult};
use trellis_query::exec::{
    next_uid, BoxedIterator, Domain, DomainKind, IteratorBase, IteratorState, IteratorStats,
    PlanIterator, PlanNode, QueryContext, Size, TagMap, Tagger, Uid,
};

/// Installs a test subscriber so `RUST_LOG=trellis_query=debug` shows driver events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One result of a [`Fixed`] node plus the witnesses that reach it.
#[derive(Debug, Clone)]
pub struct Row<T> {
    pub value: T,
    pub witnesses: Vec<T>,
}

/// A leaf over a fixed list of results.
///
/// Each result may carry several witnesses, enumerated with `next_path` and
/// published under the `via` tag. Unlike the degenerate leaves it observes the
/// context, reporting cancellation through `err`.
pub struct Fixed<T> {
    base: IteratorBase,
    rows: Vec<Row<T>>,
    tagger: Tagger<T>,
    witness_tag: Option<String>,
    index: usize,
    current: Option<usize>,
    path: usize,
    err: Option<IteratorError>,
    next_calls: i64,
    contains_calls: i64,
    contains_hits: i64,
    pub releases: usize,
    closed: bool,
}

impl<T: Domain> Fixed<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self::with_rows(values.into_iter().map(|value| Row { value, witnesses: Vec::new() }))
    }

    pub fn with_rows(rows: impl IntoIterator<Item = Row<T>>) -> Self {
        Self {
            base: IteratorBase::new(next_uid(), IteratorState::Unstarted),
            rows: rows.into_iter().collect(),
            tagger: Tagger::new(),
            witness_tag: None,
            index: 0,
            current: None,
            path: 0,
            err: None,
            next_calls: 0,
            contains_calls: 0,
            contains_hits: 0,
            releases: 0,
            closed: false,
        }
    }

    pub fn tagged(mut self, tag: &str) -> Self {
        self.tagger.add(tag);
        self
    }

    pub fn tagged_fixed(mut self, tag: &str, value: T) -> Self {
        self.tagger.add_fixed(tag, value);
        self
    }

    pub fn witnessed_as(mut self, tag: &str) -> Self {
        self.witness_tag = Some(tag.to_owned());
        self
    }

    fn stop(&mut self, ctx: &QueryContext) -> bool {
        match ctx.check() {
            Ok(()) => false,
            Err(err) => {
                self.err = Some(err);
                self.current = None;
                self.base.set_failed();
                true
            }
        }
    }
}

impl<T: Domain> fmt::Display for Fixed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({})", self.rows.len())
    }
}

impl<T: Domain> PlanNode for Fixed<T> {
    fn uid(&self) -> Uid {
        self.base.uid()
    }

    fn domain(&self) -> DomainKind {
        T::KIND
    }

    fn state(&self) -> IteratorState {
        self.base.state()
    }

    fn next_path(&mut self, ctx: &QueryContext) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if self.stop(ctx) {
            return false;
        }
        if self.path + 1 < self.rows[current].witnesses.len() {
            self.path += 1;
            true
        } else {
            false
        }
    }

    fn err(&self) -> Option<&IteratorError> {
        self.err.as_ref()
    }

    fn sub_iterators(&self) -> Vec<&dyn PlanNode> {
        Vec::new()
    }

    fn size(&self) -> Size {
        Size::exact(self.rows.len() as i64)
    }

    fn reset(&mut self) {
        self.index = 0;
        self.current = None;
        self.path = 0;
        self.base.reset();
    }

    fn close(&mut self) -> IteratorResult<()> {
        if !self.closed {
            self.closed = true;
            self.releases += 1;
        }
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn stats(&self) -> IteratorStats {
        IteratorStats {
            contains_cost: 1,
            next_cost: 1,
            size: self.size(),
            next: self.next_calls,
            contains: self.contains_calls,
            contains_next: self.contains_hits,
        }
    }
}

impl<T: Domain> PlanIterator for Fixed<T> {
    type Item = T;

    fn tag_results(&self, dst: &mut TagMap<T>) {
        self.tagger.tag_result(dst, self.result());
        if let (Some(tag), Some(current)) = (&self.witness_tag, self.current) {
            if let Some(witness) = self.rows[current].witnesses.get(self.path) {
                dst.insert(tag.clone(), witness.clone());
            }
        }
    }

    fn contains(&mut self, ctx: &QueryContext, candidate: &T) -> bool {
        if self.stop(ctx) {
            return false;
        }
        self.contains_calls += 1;
        let hit = self.rows.iter().any(|row| row.value == *candidate);
        if hit {
            self.contains_hits += 1;
        }
        hit
    }

    fn next(&mut self, ctx: &QueryContext) -> bool {
        if self.base.state().is_terminal() || self.stop(ctx) {
            return false;
        }
        self.next_calls += 1;
        if self.index >= self.rows.len() {
            self.current = None;
            self.base.set_exhausted();
            return false;
        }
        self.current = Some(self.index);
        self.index += 1;
        self.path = 0;
        self.base.set_positioned();
        true
    }

    fn result(&self) -> Option<&T> {
        self.current.map(|i| &self.rows[i].value)
    }
}

/// An intersection that drives its first child and probes the rest.
pub struct Probe<T: Domain> {
    uid: Uid,
    primary: BoxedIterator<T>,
    others: Vec<BoxedIterator<T>>,
    err: Option<IteratorError>,
}

impl<T: Domain> Probe<T> {
    pub fn new(primary: BoxedIterator<T>, others: Vec<BoxedIterator<T>>) -> Self {
        Self { uid: next_uid(), primary, others, err: None }
    }

    fn children(&self) -> impl Iterator<Item = &BoxedIterator<T>> {
        std::iter::once(&self.primary).chain(&self.others)
    }
}

impl<T: Domain> fmt::Display for Probe<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Probe")
    }
}

impl<T: Domain> PlanNode for Probe<T> {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn domain(&self) -> DomainKind {
        T::KIND
    }

    fn state(&self) -> IteratorState {
        if self.err.is_some() {
            IteratorState::Failed
        } else {
            self.primary.state()
        }
    }

    fn next_path(&mut self, ctx: &QueryContext) -> bool {
        self.primary.next_path(ctx)
    }

    fn err(&self) -> Option<&IteratorError> {
        self.err.as_ref()
    }

    fn sub_iterators(&self) -> Vec<&dyn PlanNode> {
        self.children().map(|child| child.as_ref() as &dyn PlanNode).collect()
    }

    fn size(&self) -> Size {
        let smallest = self.children().map(|child| child.size().value).min().unwrap_or(0);
        if smallest == 0 && self.children().any(|child| child.size().is_exact_zero()) {
            Size::exact(0)
        } else {
            Size::estimate(smallest)
        }
    }

    fn reset(&mut self) {
        self.primary.reset();
        for other in &mut self.others {
            other.reset();
        }
    }

    fn close(&mut self) -> IteratorResult<()> {
        let mut first = self.err.clone().map(Err).unwrap_or(Ok(()));
        for child in std::iter::once(&mut self.primary).chain(&mut self.others) {
            let closed = child.close();
            if first.is_ok() {
                first = closed;
            }
        }
        first
    }

    fn stats(&self) -> IteratorStats {
        let primary = self.primary.stats();
        let probes: i64 = self.others.iter().map(|other| other.stats().contains_cost).sum();
        IteratorStats {
            contains_cost: primary.contains_cost + probes,
            next_cost: primary.next_cost + probes,
            size: self.size(),
            ..IteratorStats::default()
        }
    }
}

impl<T: Domain> PlanIterator for Probe<T> {
    type Item = T;

    fn tag_results(&self, dst: &mut TagMap<T>) {
        for child in self.children() {
            child.tag_results(dst);
        }
    }

    fn contains(&mut self, ctx: &QueryContext, candidate: &T) -> bool {
        std::iter::once(&mut self.primary)
            .chain(&mut self.others)
            .all(|child| child.contains(ctx, candidate))
    }

    fn next(&mut self, ctx: &QueryContext) -> bool {
        if self.err.is_some() {
            return false;
        }
        loop {
            if let Err(err) = ctx.check() {
                self.err = Some(err);
                return false;
            }
            if !self.primary.next(ctx) {
                let err = self.children().find_map(|child| child.err().cloned());
                self.err = err;
                return false;
            }
            let Some(candidate) = self.primary.result().cloned() else {
                continue;
            };
            if self.others.iter_mut().all(|other| other.contains(ctx, &candidate)) {
                return true;
            }
            if let Some(err) = self.others.iter().find_map(|other| other.err().cloned()) {
                self.err = Some(err);
                return false;
            }
        }
    }

    fn result(&self) -> Option<&T> {
        self.primary.result()
    }
}
