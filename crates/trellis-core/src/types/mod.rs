//! Core data types for trellis.
//!
//! Query iterators are generic over one of these two domains.

mod reference;
mod value;

pub use reference::Ref;
pub use value::Value;
