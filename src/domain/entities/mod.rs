//! Core domain entities.
//!
//! The registry owns a single entity, [`Link`]. Creation and partial updates use
//! dedicated input types:
//! - [`NewLink`] - fields supplied by the caller on creation
//! - [`LinkPatch`] - optional fields for partial updates

pub mod link;

pub use link::{Link, LinkPatch, NewLink};
