//! Link values attached to documented entities

use crate::comment::CommentNode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Topic page associated with an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicLink {
    /// Topic identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Source file of the topic, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// External location, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TopicLink {
    /// Create a topic link
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file_path: None,
            url: None,
        }
    }

    /// Set the source file
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Set the external location
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// "See also" reference to another entity or an external page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeeAlso {
    /// Identity of the referenced entity (`cref`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// External link (`href`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SeeAlso {
    /// Reference another entity by id
    pub fn to_entity(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            url: None,
            label: None,
        }
    }

    /// Reference an external page
    pub fn to_url(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            target: None,
            url: Some(url.into()),
            label: Some(label.into()),
        }
    }

    /// Build from a `<seealso>` node
    ///
    /// Nodes carrying neither `cref` nor `href` yield `None`.
    pub fn from_node(node: &CommentNode) -> Option<Self> {
        let target = node.attribute("cref").map(str::to_string);
        let url = node.attribute("href").map(str::to_string);
        if target.is_none() && url.is_none() {
            return None;
        }

        let label = node.inner_xml().trim();
        Some(Self {
            target,
            url,
            label: (!label.is_empty()).then(|| label.to_string()),
        })
    }

    /// Text to show for the link
    pub fn display_text(&self) -> &str {
        self.label
            .as_deref()
            .or(self.target.as_deref())
            .or(self.url.as_deref())
            .unwrap_or_default()
    }
}
