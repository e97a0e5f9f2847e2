//! Compiler-generated XML documentation files
//!
//! Layout:
//!
//! ```xml
//! <doc>
//!   <assembly><name>MyLib</name></assembly>
//!   <members>
//!     <member name="T:MyLib.Widget"><summary>...</summary></member>
//!   </members>
//! </doc>
//! ```

use super::tree::{strip_bom, CommentTree};
use crate::config::ModelConfig;
use crate::error::{DocNodeError, Result};
use crate::model::{EntityBuilder, Entity, SeeAlso};
use crate::types::{MemberId, MemberKind};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Parsed documentation file: assembly name and one comment tree per member
#[derive(Debug, Clone, Default)]
pub struct DocFile {
    /// Assembly the comments belong to
    pub assembly: Option<String>,
    /// Member comments in file order
    pub members: Vec<Arc<CommentTree>>,
}

impl DocFile {
    /// Read and parse a documentation file from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DocNodeError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let doc = Self::parse(&content).map_err(|e| e.with_context(path.display().to_string()))?;
        debug!(
            "Loaded {} member comments from {}",
            doc.members.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Parse documentation file content
    ///
    /// A leading byte order mark is ignored.
    pub fn parse(xml: &str) -> Result<Self> {
        let xml = strip_bom(xml);
        let mut reader = Reader::from_str(xml);

        let mut path: Vec<String> = Vec::new();
        let mut assembly = None;
        let mut members = Vec::new();
        let mut member_start = None;
        let mut saw_root = false;
        let mut saw_members = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if path.is_empty() {
                        check_root(&name, saw_root)?;
                        saw_root = true;
                    }
                    if at(&path, &["doc"]) && name == "members" {
                        saw_members = true;
                    }
                    if at(&path, &["doc", "members"]) && name == "member" {
                        member_start = Some(opening_tag_start(xml, reader.buffer_position()));
                    }
                    path.push(name);
                }
                Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if path.is_empty() {
                        check_root(&name, saw_root)?;
                        saw_root = true;
                    }
                    if at(&path, &["doc"]) && name == "members" {
                        saw_members = true;
                    }
                    if at(&path, &["doc", "members"]) && name == "member" {
                        let end = reader.buffer_position();
                        let start = opening_tag_start(xml, end);
                        members.push(parse_member(&xml[start..end], members.len())?);
                    }
                }
                Event::Text(t) => {
                    if at(&path, &["doc", "assembly", "name"]) {
                        let text = t.unescape()?;
                        let text = text.trim();
                        if !text.is_empty() {
                            assembly = Some(text.to_string());
                        }
                    }
                }
                Event::End(_) => {
                    if at(&path, &["doc", "members", "member"]) {
                        if let Some(start) = member_start.take() {
                            let end = reader.buffer_position();
                            members.push(parse_member(&xml[start..end], members.len())?);
                        }
                    }
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !path.is_empty() {
            return Err(DocNodeError::Xml(format!("unclosed element <{}>", path.join("/"))));
        }
        if !saw_root {
            return Err(DocNodeError::InvalidDocFile("missing <doc> root".to_string()));
        }
        if !saw_members {
            return Err(DocNodeError::InvalidDocFile("missing <members>".to_string()));
        }

        Ok(Self { assembly, members })
    }

    /// Build one entity per member comment
    ///
    /// The member `name` attribute becomes the id; names and kinds come from
    /// the id. Members without a `name` get no id and are built as
    /// [`Entity::Other`].
    pub fn into_entities(&self, config: &ModelConfig) -> Vec<Entity> {
        self.members
            .iter()
            .map(|tree| build_entity(tree, config))
            .collect()
    }
}

fn build_entity(tree: &Arc<CommentTree>, config: &ModelConfig) -> Entity {
    let mut builder = EntityBuilder::new()
        .normalized_id_max_len(config.normalized_id_max_len)
        .comment_tree(Arc::clone(tree));

    let kind = match tree.attribute("name") {
        Some(id) => {
            let member = MemberId::parse(id);
            if member.kind == MemberKind::Unknown {
                warn!("Member id without a known kind prefix: {}", id);
            }
            builder = builder
                .id(id)
                .name(member.name())
                .full_name(member.full_name());
            member.kind
        }
        None => {
            warn!("Member comment without a name attribute");
            MemberKind::Unknown
        }
    };

    if config.collect_see_also {
        builder = builder.see_alsos(tree.select_all("seealso").filter_map(SeeAlso::from_node));
    }

    builder.build_entity(kind)
}

fn check_root(name: &str, saw_root: bool) -> Result<()> {
    if saw_root {
        return Err(DocNodeError::Xml(
            "documentation file has more than one root element".to_string(),
        ));
    }
    if name != "doc" {
        return Err(DocNodeError::InvalidDocFile(format!(
            "expected <doc> root, found <{}>",
            name
        )));
    }
    Ok(())
}

/// Start of the tag that ends just before `tag_end`
fn opening_tag_start(xml: &str, tag_end: usize) -> usize {
    xml[..tag_end].rfind('<').unwrap_or(0)
}

fn at(path: &[String], expected: &[&str]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(a, b)| a == b)
}

fn parse_member(xml: &str, position: usize) -> Result<Arc<CommentTree>> {
    CommentTree::parse(xml)
        .map(Arc::new)
        .map_err(|e| e.with_context(format!("member #{}", position + 1)))
}
