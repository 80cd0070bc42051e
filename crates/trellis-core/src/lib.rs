//! Trellis Core
//!
//! This crate provides the two value domains that query iterators in
//! `trellis-query` enumerate.
//!
//! # Overview
//!
//! - **References**: [`Ref`] is an opaque backend token. It is cheap to compare,
//!   hash and intersect, and its bytes are never interpreted above the storage layer.
//! - **Values**: [`Value`] is a fully decoded graph datum (IRIs, blank nodes and
//!   literals) needed whenever a query compares literal content.
//!
//! # Example
//!
//! ```
//! use trellis_core::{Ref, Value};
//!
//! let a = Ref::from(42u64);
//! let b = Ref::from_bytes(&[0, 0, 0, 0, 0, 0, 0, 42]);
//! assert_eq!(a, b);
//!
//! let name: Value = "Alice".into();
//! assert_eq!(name.as_str(), Some("Alice"));
//! assert_eq!(Value::iri("http://xmlns.com/foaf/0.1/name").to_string(), "<http://xmlns.com/foaf/0.1/name>");
//! ```
//!
//! # Modules
//!
//! - [`types`] - [`Ref`] and [`Value`]
//! - [`error`] - Error types ([`CoreError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{Ref, Value};
