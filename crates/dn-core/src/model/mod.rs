//! Documented entity model
//!
//! Identity, labels and comment-derived text for namespaces, types and members.

pub mod base;
pub mod builder;
pub mod entities;
pub mod index;
pub mod links;

pub use base::{Documentable, DocumentableExt, ModelBase, REMARKS_TAG, SUMMARY_TAG};
pub use builder::EntityBuilder;
pub use entities::{Entity, Event, ExceptionDoc, Field, Method, Namespace, ParamDoc, Property, TypeModel};
pub use index::ModelIndex;
pub use links::{SeeAlso, TopicLink};
