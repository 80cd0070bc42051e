//! Degenerate plan nodes.
//!
//! - [`null`] - The empty set, for branches proven to match nothing
//! - [`error`] - A node that replays a construction-time failure
//!
//! Both come in a reference-domain and a value-domain flavour through the
//! type parameter; the aliases name the four concrete nodes.

pub mod error;
pub mod null;

pub use error::{ErrorIterator, ErrorRefIterator, ErrorValueIterator};
pub use null::{NullIterator, NullRefIterator, NullValueIterator};
