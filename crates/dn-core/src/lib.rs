//! dn-core - Core library for docnode
//!
//! This crate provides the documented entity model: identity and equality of
//! namespaces, types and members, parsing of structured XML doc comments, and
//! derivation of descriptive text from those comments.

pub mod error;
pub mod types;
pub mod config;
pub mod comment;
pub mod model;

pub use error::{DocNodeError, Result};
pub use types::*;
