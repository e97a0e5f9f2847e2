//! Entity builder for fluent API

use super::base::{DocumentableExt, ModelBase};
use super::entities::Entity;
use super::links::{SeeAlso, TopicLink};
use crate::comment::CommentTree;
use crate::types::{MemberKind, NormalizedId, DEFAULT_NORMALIZED_ID_MAX_LEN};
use std::sync::Arc;

/// Builder for creating documented entities with fluent API
pub struct EntityBuilder {
    id: Option<String>,
    normalized_id: Option<String>,
    normalized_id_max_len: usize,
    name: String,
    full_name: String,
    comment_tree: Option<Arc<CommentTree>>,
    topic_link: Option<TopicLink>,
    see_alsos: Vec<SeeAlso>,
}

impl EntityBuilder {
    /// Create a new builder with no identity
    pub fn new() -> Self {
        Self {
            id: None,
            normalized_id: None,
            normalized_id_max_len: DEFAULT_NORMALIZED_ID_MAX_LEN,
            name: String::new(),
            full_name: String::new(),
            comment_tree: None,
            topic_link: None,
            see_alsos: Vec::new(),
        }
    }

    /// Set the identity token
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the normalized id explicitly instead of deriving it
    pub fn normalized_id(mut self, normalized_id: impl Into<String>) -> Self {
        self.normalized_id = Some(normalized_id.into());
        self
    }

    /// Set the length limit used when deriving the normalized id
    ///
    /// Values below [`MIN_NORMALIZED_ID_LEN`](crate::types::MIN_NORMALIZED_ID_LEN)
    /// are raised to it.
    pub fn normalized_id_max_len(mut self, max_len: usize) -> Self {
        self.normalized_id_max_len = max_len;
        self
    }

    /// Set the short name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the qualified name
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Set the comment tree, applied when the entity is built
    pub fn comment_tree(mut self, tree: Arc<CommentTree>) -> Self {
        self.comment_tree = Some(tree);
        self
    }

    /// Set the topic link
    pub fn topic_link(mut self, topic: TopicLink) -> Self {
        self.topic_link = Some(topic);
        self
    }

    /// Append a see-also link
    pub fn see_also(mut self, link: SeeAlso) -> Self {
        self.see_alsos.push(link);
        self
    }

    /// Append several see-also links
    pub fn see_alsos(mut self, links: impl IntoIterator<Item = SeeAlso>) -> Self {
        self.see_alsos.extend(links);
        self
    }

    /// Build a bare base entity
    pub fn build(self) -> ModelBase {
        let (mut base, tree) = self.into_parts();
        base.set_comment_tree(tree);
        base
    }

    /// Build the concrete entity for `kind`
    pub fn build_entity(self, kind: MemberKind) -> Entity {
        let (base, tree) = self.into_parts();
        let mut entity = Entity::from_base(kind, base);
        entity.set_comment_tree(tree);
        entity
    }

    fn into_parts(self) -> (ModelBase, Option<Arc<CommentTree>>) {
        let max_len = self.normalized_id_max_len;
        let normalized_id = self.normalized_id.or_else(|| {
            self.id
                .as_deref()
                .map(|id| NormalizedId::from_id_with_limit(id, max_len).0)
        });

        let mut base = ModelBase::new();
        base.id = self.id;
        base.normalized_id = normalized_id;
        base.name = self.name;
        base.full_name = self.full_name;
        base.topic_link = self.topic_link;
        base.see_alsos = self.see_alsos;

        (base, self.comment_tree)
    }
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
