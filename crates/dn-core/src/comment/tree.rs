//! Structured comment tree
//!
//! A parsed XML documentation comment: one container element (usually
//! `<member name="...">`) and its direct child elements. Each child keeps its
//! raw inner markup so nested tags such as `<see cref="..."/>` survive
//! extraction untouched.

use crate::error::{DocNodeError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::trace;

/// Root element name used by [`CommentTree::parse_fragment`]
pub const IMPLICIT_ROOT: &str = "doc";

/// A direct child element of a comment tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    tag: String,
    attributes: Vec<(String, String)>,
    inner_xml: String,
}

impl CommentNode {
    /// Create a node from its parts
    pub fn new(
        tag: impl Into<String>,
        attributes: Vec<(String, String)>,
        inner_xml: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            inner_xml: inner_xml.into(),
        }
    }

    /// Element name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        find_attribute(&self.attributes, name)
    }

    /// Raw inner markup, untrimmed
    pub fn inner_xml(&self) -> &str {
        &self.inner_xml
    }
}

/// Parsed documentation comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentTree {
    root: String,
    attributes: Vec<(String, String)>,
    children: Vec<CommentNode>,
}

impl CommentTree {
    /// Build a tree directly from nodes
    pub fn new(root: impl Into<String>, children: Vec<CommentNode>) -> Self {
        Self {
            root: root.into(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Parse a comment with a single container element
    pub fn parse(xml: &str) -> Result<Self> {
        let xml = strip_bom(xml);
        let mut reader = Reader::from_str(xml);

        let mut root: Option<(String, Vec<(String, String)>)> = None;
        let mut children = Vec::new();
        let mut open: Option<(String, Vec<(String, String)>, usize)> = None;
        let mut depth = 0usize;
        let mut closed = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    if depth == 0 && closed {
                        return Err(DocNodeError::Xml(
                            "comment has more than one root element".to_string(),
                        ));
                    }
                    depth += 1;
                    match depth {
                        1 => root = Some(read_element(&e)?),
                        2 => {
                            let (tag, attributes) = read_element(&e)?;
                            open = Some((tag, attributes, reader.buffer_position()));
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => match depth {
                    0 => {
                        if closed {
                            return Err(DocNodeError::Xml(
                                "comment has more than one root element".to_string(),
                            ));
                        }
                        root = Some(read_element(&e)?);
                        closed = true;
                    }
                    1 => {
                        let (tag, attributes) = read_element(&e)?;
                        children.push(CommentNode::new(tag, attributes, String::new()));
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if depth == 0 {
                        return Err(DocNodeError::Xml(format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        )));
                    }
                    if depth == 2 {
                        if let Some((tag, attributes, content_start)) = open.take() {
                            let content_end =
                                closing_tag_start(xml, reader.buffer_position(), content_start);
                            children.push(CommentNode::new(
                                tag,
                                attributes,
                                &xml[content_start..content_end],
                            ));
                        }
                    }
                    depth -= 1;
                    if depth == 0 {
                        closed = true;
                    }
                }
                Event::Text(t) if depth == 0 => {
                    if !t.iter().all(|b| b.is_ascii_whitespace()) {
                        return Err(DocNodeError::Xml(
                            "text outside of the comment root element".to_string(),
                        ));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(DocNodeError::Xml("unclosed element in comment".to_string()));
        }

        let (root, attributes) =
            root.ok_or_else(|| DocNodeError::Xml("comment has no root element".to_string()))?;

        trace!(root = %root, children = children.len(), "Parsed comment tree");

        Ok(Self {
            root,
            attributes,
            children,
        })
    }

    /// Parse a bare comment body such as `<summary>..</summary><remarks>..</remarks>`
    pub fn parse_fragment(body: &str) -> Result<Self> {
        Self::parse(&format!("<{IMPLICIT_ROOT}>{body}</{IMPLICIT_ROOT}>"))
    }

    /// Name of the container element
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// Attribute of the container element (e.g. `name` on `<member>`)
    pub fn attribute(&self, name: &str) -> Option<&str> {
        find_attribute(&self.attributes, name)
    }

    /// Direct children in document order
    pub fn children(&self) -> &[CommentNode] {
        &self.children
    }

    /// Check if the comment has no child elements
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First direct child with the given tag
    pub fn select(&self, tag: &str) -> Option<&CommentNode> {
        self.children.iter().find(|n| n.tag == tag)
    }

    /// All direct children with the given tag
    pub fn select_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a CommentNode> + 'a {
        self.children.iter().filter(move |n| n.tag == tag)
    }

    /// First direct child with the given tag whose attribute equals `value`
    pub fn select_by_attr(&self, tag: &str, attr: &str, value: &str) -> Option<&CommentNode> {
        self.children
            .iter()
            .find(|n| n.tag == tag && n.attribute(attr) == Some(value))
    }

    /// Trimmed inner markup of the first child with the given tag
    pub fn text_of(&self, tag: &str) -> Option<String> {
        self.select(tag).map(|n| n.inner_xml.trim().to_string())
    }
}

/// Drop a leading UTF-8 byte order mark
///
/// The reader skips it without counting it in `buffer_position`, which would
/// shift every slice taken from the input.
pub(crate) fn strip_bom(xml: &str) -> &str {
    xml.strip_prefix('\u{feff}').unwrap_or(xml)
}

/// Start of the closing tag that ends just before `tag_end`
fn closing_tag_start(xml: &str, tag_end: usize, content_start: usize) -> usize {
    xml[..tag_end]
        .rfind("</")
        .unwrap_or(content_start)
        .max(content_start)
}

fn read_element(e: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok((tag, attributes))
}

fn find_attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}
