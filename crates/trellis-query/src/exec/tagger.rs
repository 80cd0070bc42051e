//! Tag bookkeeping for plan nodes.

use super::iterator::{Domain, TagMap};

/// The tags a node owns.
///
/// A node binds its current result to every tag in [`tags`](Self::tags), and
/// also publishes a set of fixed bindings that do not depend on the cursor.
/// Combinators embed a `Tagger` and forward
/// [`tag_results`](super::PlanIterator::tag_results) to
/// [`tag_result`](Self::tag_result).
#[derive(Debug, Clone, PartialEq)]
pub struct Tagger<T> {
    tags: Vec<String>,
    fixed: Vec<(String, T)>,
}

impl<T: Domain> Tagger<T> {
    /// Creates a tagger with no tags.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new(), fixed: Vec::new() }
    }

    /// Adds a tag bound to the node's current result. Duplicates are ignored.
    pub fn add(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Adds a tag bound to a fixed value, replacing any previous fixed value.
    pub fn add_fixed(&mut self, tag: impl Into<String>, value: T) {
        let tag = tag.into();
        match self.fixed.iter_mut().find(|(name, _)| *name == tag) {
            Some((_, bound)) => *bound = value,
            None => self.fixed.push((tag, value)),
        }
    }

    /// Returns the tags bound to the current result.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the fixed bindings.
    pub fn fixed(&self) -> impl Iterator<Item = (&str, &T)> {
        self.fixed.iter().map(|(tag, value)| (tag.as_str(), value))
    }

    /// Returns true if no tags of either kind are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.fixed.is_empty()
    }

    /// Adds every tag from `other` into this tagger.
    ///
    /// Used when a planner replaces a node and the replacement must keep the
    /// bindings of the node it replaces.
    pub fn copy_from(&mut self, other: &Self) {
        for tag in &other.tags {
            self.add(tag.clone());
        }
        for (tag, value) in &other.fixed {
            self.add_fixed(tag.clone(), value.clone());
        }
    }

    /// Writes the bindings for `current` into `dst`.
    ///
    /// Fixed bindings are always written. Cursor tags are written only when
    /// the node is positioned on a result. Nothing is removed from `dst`.
    pub fn tag_result(&self, dst: &mut TagMap<T>, current: Option<&T>) {
        for (tag, value) in &self.fixed {
            dst.insert(tag.clone(), value.clone());
        }
        if let Some(current) = current {
            for tag in &self.tags {
                dst.insert(tag.clone(), current.clone());
            }
        }
    }
}

impl<T: Domain> Default for Tagger<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::{Ref, Value};

    use super::*;

    #[test]
    fn duplicate_tags_are_ignored() {
        let mut tagger = Tagger::<Ref>::new();
        tagger.add("x");
        tagger.add("x");
        tagger.add("y");
        assert_eq!(tagger.tags(), ["x", "y"]);
    }

    #[test]
    fn fixed_binding_is_replaced() {
        let mut tagger = Tagger::new();
        tagger.add_fixed("lang", Value::from("en"));
        tagger.add_fixed("lang", Value::from("fr"));
        let fixed: Vec<_> = tagger.fixed().collect();
        assert_eq!(fixed, vec![("lang", &Value::from("fr"))]);
    }

    #[test]
    fn tag_result_is_additive() {
        let mut tagger = Tagger::new();
        tagger.add("person");
        tagger.add_fixed("pred", Ref::from(9u64));

        let mut dst = TagMap::new();
        dst.insert("sibling".to_owned(), Ref::from(1u64));

        tagger.tag_result(&mut dst, Some(&Ref::from(5u64)));
        tagger.tag_result(&mut dst, Some(&Ref::from(5u64)));

        assert_eq!(dst.len(), 3);
        assert_eq!(dst["sibling"], Ref::from(1u64));
        assert_eq!(dst["person"], Ref::from(5u64));
        assert_eq!(dst["pred"], Ref::from(9u64));
    }

    #[test]
    fn unpositioned_node_writes_only_fixed_tags() {
        let mut tagger = Tagger::new();
        tagger.add("person");
        tagger.add_fixed("pred", Ref::from(9u64));

        let mut dst = TagMap::new();
        tagger.tag_result(&mut dst, None);
        assert_eq!(dst.len(), 1);
        assert!(dst.contains_key("pred"));
    }

    #[test]
    fn copy_from_merges() {
        let mut a = Tagger::<Ref>::new();
        a.add("x");
        let mut b = Tagger::new();
        b.add("x");
        b.add("y");
        b.add_fixed("z", Ref::from(0u64));

        a.copy_from(&b);
        assert_eq!(a.tags(), ["x", "y"]);
        assert_eq!(a.fixed().count(), 1);
        assert!(!a.is_empty());
        assert!(Tagger::<Ref>::default().is_empty());
    }
}
