//! Documentable entity base
//!
//! [`ModelBase`] holds the identity, display labels and documentation text
//! shared by every documented program element. Concrete entities embed it and
//! implement [`Documentable`]; [`DocumentableExt`] runs the comment derivation
//! in a fixed order: base fields first, then whatever the entity adds in
//! [`Documentable::derive_extra`].

use super::links::{SeeAlso, TopicLink};
use crate::comment::CommentTree;
use serde::Serialize;
use std::any::Any;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::trace;

/// Tag holding the short description
pub const SUMMARY_TAG: &str = "summary";

/// Tag holding the long-form remarks
pub const REMARKS_TAG: &str = "remarks";

/// Identity, labels and documentation text of a documented element
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelBase {
    /// Documentation comment id, the equality key
    pub id: Option<String>,
    /// Filesystem-safe rendering of `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_id: Option<String>,
    /// Short display name
    pub name: String,
    /// Qualified display name
    pub full_name: String,
    #[serde(skip)]
    comment_tree: Option<Arc<CommentTree>>,
    /// Content of `<summary>` at the last tree assignment
    pub description: Option<String>,
    /// Content of `<remarks>` at the last tree assignment
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_link: Option<TopicLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub see_alsos: Vec<SeeAlso>,
}

impl ModelBase {
    /// Create an empty entity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with the given id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// The comment tree last assigned, if any
    pub fn comment_tree(&self) -> Option<&Arc<CommentTree>> {
        self.comment_tree.as_ref()
    }

    /// Trimmed inner markup of the first `tag` child of the comment tree
    ///
    /// Returns `None` when no tree is assigned or no child matches.
    pub fn doc_from_tag(&self, tag: &str) -> Option<String> {
        self.comment_tree.as_ref()?.text_of(tag)
    }

    /// Append a see-also link
    pub fn add_see_also(&mut self, link: SeeAlso) {
        self.see_alsos.push(link);
    }

    /// Compare against a value of any type; values that are not a `ModelBase` are never equal
    pub fn equals_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<ModelBase>()
            .map(|o| self == o)
            .unwrap_or(false)
    }

    fn derive_base_docs(&mut self) {
        self.description = self.doc_from_tag(SUMMARY_TAG);
        self.remarks = self.doc_from_tag(REMARKS_TAG);
    }
}

impl PartialEq for ModelBase {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.id == other.id
    }
}

impl Eq for ModelBase {}

impl Hash for ModelBase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.id {
            Some(id) => id.hash(state),
            None => 0u64.hash(state),
        }
    }
}

/// A documented program element
///
/// Implementors expose their embedded [`ModelBase`] and may contribute extra
/// derivation in [`derive_extra`](Documentable::derive_extra). Assigning a
/// tree goes through [`DocumentableExt`], which every implementor gets.
pub trait Documentable {
    /// The embedded base
    fn base(&self) -> &ModelBase;

    /// The embedded base, mutably
    fn base_mut(&mut self) -> &mut ModelBase;

    /// Entity-specific derivation, run after the base fields are set
    ///
    /// Only called while a comment tree is assigned.
    fn derive_extra(&mut self) {}

    /// See [`ModelBase::doc_from_tag`]
    fn doc_from_tag(&self, tag: &str) -> Option<String> {
        self.base().doc_from_tag(tag)
    }

    /// Identity token
    fn id(&self) -> Option<&str> {
        self.base().id.as_deref()
    }
}

/// Comment tree assignment and the derivation pipeline
///
/// Blanket-implemented for every [`Documentable`], so the order (base fields,
/// then `derive_extra`) is the same for all entities.
pub trait DocumentableExt: Documentable {
    /// Assign the comment tree and derive documentation from it
    ///
    /// `None` is stored but runs no derivation: previously derived text is kept.
    fn set_comment_tree(&mut self, tree: Option<Arc<CommentTree>>);

    /// Run the derivation pipeline against the current tree
    fn on_comment_tree_updated(&mut self);
}

impl<T: Documentable + ?Sized> DocumentableExt for T {
    fn set_comment_tree(&mut self, tree: Option<Arc<CommentTree>>) {
        let present = tree.is_some();
        self.base_mut().comment_tree = tree;
        if present {
            self.on_comment_tree_updated();
        }
    }

    fn on_comment_tree_updated(&mut self) {
        let base = self.base_mut();
        if base.comment_tree.is_none() {
            return;
        }
        base.derive_base_docs();
        trace!(id = ?base.id, "Derived documentation from comment tree");
        self.derive_extra();
    }
}

impl Documentable for ModelBase {
    fn base(&self) -> &ModelBase {
        self
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(base: &ModelBase) -> u64 {
        let mut hasher = DefaultHasher::new();
        base.hash(&mut hasher);
        hasher.finish()
    }

    fn tree(body: &str) -> Option<Arc<CommentTree>> {
        Some(Arc::new(CommentTree::parse_fragment(body).unwrap()))
    }

    #[test]
    fn test_equality_by_id_only() {
        let mut a = ModelBase::with_id("T:Ns.A");
        a.name = "A".to_string();
        let mut b = ModelBase::with_id("T:Ns.A");
        b.name = "Other".to_string();
        b.full_name = "Ns.Other".to_string();
        b.set_comment_tree(tree("<summary>x</summary>"));

        assert_eq!(a, b);
        assert_ne!(a, ModelBase::with_id("T:Ns.B"));
        assert_ne!(a, ModelBase::new());
    }

    #[test]
    fn test_absent_ids_equal_and_collide() {
        let a = ModelBase::new();
        let b = ModelBase::new();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_hash_consistent_with_equality() {
        let a = ModelBase::with_id("M:Ns.A.Run");
        let mut b = ModelBase::with_id("M:Ns.A.Run");
        b.description = Some("different".to_string());
        assert_eq!(hash_of(&a), hash_of(&a));
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_equals_any_type_mismatch() {
        let a = ModelBase::with_id("T:Ns.A");
        assert!(a.equals_any(&ModelBase::with_id("T:Ns.A")));
        assert!(!a.equals_any(&"T:Ns.A".to_string()));
        assert!(!a.equals_any(&42u32));
    }

    #[test]
    fn test_derives_summary_and_remarks() {
        let mut base = ModelBase::with_id("T:Ns.A");
        base.set_comment_tree(tree("<summary>Hello</summary><remarks> World </remarks>"));
        assert_eq!(base.description.as_deref(), Some("Hello"));
        assert_eq!(base.remarks.as_deref(), Some("World"));
    }

    #[test]
    fn test_missing_remarks_is_none() {
        let mut base = ModelBase::new();
        base.remarks = Some("stale".to_string());
        base.set_comment_tree(tree("<summary>Only summary</summary>"));
        assert_eq!(base.description.as_deref(), Some("Only summary"));
        assert_eq!(base.remarks, None);
    }

    #[test]
    fn test_absent_tree_keeps_previous_text() {
        let mut base = ModelBase::new();
        base.description = Some("X".to_string());
        base.set_comment_tree(None);
        assert_eq!(base.description.as_deref(), Some("X"));
        assert!(base.comment_tree().is_none());

        base.set_comment_tree(tree("<summary>Y</summary><remarks>R</remarks>"));
        base.set_comment_tree(None);
        assert_eq!(base.description.as_deref(), Some("Y"));
        assert_eq!(base.remarks.as_deref(), Some("R"));
    }

    #[test]
    fn test_reassignment_recomputes() {
        let mut base = ModelBase::new();
        base.set_comment_tree(tree("<summary>First</summary><remarks>R</remarks>"));
        base.set_comment_tree(tree("<summary>Second</summary>"));
        assert_eq!(base.description.as_deref(), Some("Second"));
        assert_eq!(base.remarks, None);
    }

    #[test]
    fn test_doc_from_tag_without_tree() {
        let base = ModelBase::new();
        assert_eq!(base.doc_from_tag(SUMMARY_TAG), None);
    }

    #[test]
    fn test_doc_from_tag_keeps_markup() {
        let mut base = ModelBase::new();
        base.set_comment_tree(tree(
            r#"<summary>  Wraps <see cref="T:Ns.Inner"/> values.  </summary>"#,
        ));
        assert_eq!(
            base.doc_from_tag(SUMMARY_TAG).as_deref(),
            Some(r#"Wraps <see cref="T:Ns.Inner"/> values."#)
        );
    }

    struct Tagged {
        base: ModelBase,
        seen_description: Option<String>,
    }

    impl Documentable for Tagged {
        fn base(&self) -> &ModelBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ModelBase {
            &mut self.base
        }

        fn derive_extra(&mut self) {
            self.seen_description = self.base.description.clone();
            self.base.description = None;
        }
    }

    #[test]
    fn test_extra_step_runs_after_base_fields() {
        let mut entity = Tagged {
            base: ModelBase::with_id("T:Ns.Tagged"),
            seen_description: None,
        };
        entity.set_comment_tree(tree("<summary>Base</summary><remarks>R</remarks>"));

        assert_eq!(entity.seen_description.as_deref(), Some("Base"));
        assert_eq!(entity.base.description, None);
        assert_eq!(entity.base.remarks.as_deref(), Some("R"));

        entity.seen_description = Some("kept".to_string());
        entity.set_comment_tree(None);
        assert_eq!(entity.seen_description.as_deref(), Some("kept"));
    }

    #[test]
    fn test_see_alsos_start_empty_and_keep_order() {
        let mut base = ModelBase::new();
        assert!(base.see_alsos.is_empty());

        for i in 0..3 {
            base.add_see_also(SeeAlso::to_entity(format!("T:Ns.T{i}")));
        }
        let targets: Vec<_> = base
            .see_alsos
            .iter()
            .map(|s| s.target.clone().unwrap_or_default())
            .collect();
        assert_eq!(targets, vec!["T:Ns.T0", "T:Ns.T1", "T:Ns.T2"]);
    }
}
