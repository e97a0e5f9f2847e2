//! Structured documentation comments
//!
//! Parsing of XML doc comments into queryable trees, and reading of whole
//! documentation files.

pub mod doc_file;
pub mod tree;

pub use doc_file::DocFile;
pub use tree::{CommentNode, CommentTree, IMPLICIT_ROOT};
