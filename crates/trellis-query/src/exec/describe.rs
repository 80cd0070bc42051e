//! Plan-tree descriptions.
//!
//! A [`Description`] is a snapshot of a plan tree built entirely through the
//! [`PlanNode`] contract, for explain output and logs.

use serde::Serialize;

use super::iterator::{DomainKind, PlanNode, Size};
use super::uid::Uid;

/// A serializable view of one node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    /// The node's identity.
    pub uid: Uid,
    /// The node's debug label.
    pub name: String,
    /// The value domain it enumerates.
    pub domain: DomainKind,
    /// Its cardinality estimate.
    pub size: Size,
    /// Set when the node has already failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Descriptions of its immediate children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Description>,
}

impl Description {
    /// Returns the number of nodes in the described tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Returns the height of the described tree; a leaf has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(Self::height).max().unwrap_or(0)
    }

    /// Returns true if any node in the tree has failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some() || self.children.iter().any(Self::has_error)
    }

    /// Serializes the tree as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Describes `node` and everything beneath it.
#[must_use]
pub fn describe(node: &dyn PlanNode) -> Description {
    Description {
        uid: node.uid(),
        name: node.to_string(),
        domain: node.domain(),
        size: node.size(),
        error: node.err().map(ToString::to_string),
        children: node.sub_iterators().into_iter().map(describe).collect(),
    }
}
