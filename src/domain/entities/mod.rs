//! Core domain entities.
//!
//! The shortener has a single entity, [`Link`], plus the [`NewLink`] input
//! used to create one.

pub mod link;

pub use link::{Link, NewLink};
