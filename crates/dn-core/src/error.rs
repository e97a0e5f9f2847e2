//! Error types for docnode

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docnode
#[derive(Debug, Error)]
pub enum DocNodeError {
    /// Malformed XML in a comment or documentation file
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Well-formed XML that is not a documentation file
    #[error("Invalid documentation file: {0}")]
    InvalidDocFile(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DocNodeError>,
    },
}

impl DocNodeError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DocNodeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<quick_xml::Error> for DocNodeError {
    fn from(err: quick_xml::Error) -> Self {
        DocNodeError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocNodeError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        DocNodeError::Xml(err.to_string())
    }
}

impl From<toml::de::Error> for DocNodeError {
    fn from(err: toml::de::Error) -> Self {
        DocNodeError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for DocNodeError {
    fn from(err: toml::ser::Error) -> Self {
        DocNodeError::Toml(err.to_string())
    }
}

/// Result type alias for docnode
pub type Result<T> = std::result::Result<T, DocNodeError>;
