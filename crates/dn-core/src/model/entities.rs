//! Concrete documented entities

use super::base::{Documentable, ModelBase};
use crate::comment::{CommentNode, CommentTree};
use crate::types::MemberKind;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// Documentation of a named parameter (`<param>` or `<typeparam>`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDoc {
    pub name: String,
    pub description: String,
}

impl ParamDoc {
    fn from_node(node: &CommentNode) -> Self {
        Self {
            name: node.attribute("name").unwrap_or_default().to_string(),
            description: node.inner_xml().trim().to_string(),
        }
    }
}

/// Documentation of a thrown exception (`<exception cref="...">`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionDoc {
    pub cref: String,
    pub description: String,
}

impl ExceptionDoc {
    fn from_node(node: &CommentNode) -> Self {
        Self {
            cref: node.attribute("cref").unwrap_or_default().to_string(),
            description: node.inner_xml().trim().to_string(),
        }
    }
}

fn collect_params(tree: &CommentTree, tag: &str) -> Vec<ParamDoc> {
    tree.select_all(tag).map(ParamDoc::from_node).collect()
}

/// Implements identity equality and the base accessors for an entity with a `base` field
macro_rules! entity_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.base == other.base
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.base.hash(state)
            }
        }

        impl From<ModelBase> for $ty {
            fn from(base: ModelBase) -> Self {
                Self {
                    base,
                    ..Default::default()
                }
            }
        }
    };
}

/// A namespace
#[derive(Debug, Clone, Default, Serialize)]
pub struct Namespace {
    #[serde(flatten)]
    pub base: ModelBase,
}

entity_identity!(Namespace);

impl Documentable for Namespace {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}

/// A type (class, struct, interface, enum or delegate)
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeModel {
    #[serde(flatten)]
    pub base: ModelBase,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<ParamDoc>,
}

entity_identity!(TypeModel);

impl Documentable for TypeModel {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }

    fn derive_extra(&mut self) {
        if let Some(tree) = self.base.comment_tree() {
            self.type_params = collect_params(tree, "typeparam");
        }
    }
}

/// A method, constructor or operator
#[derive(Debug, Clone, Default, Serialize)]
pub struct Method {
    #[serde(flatten)]
    pub base: ModelBase,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<ParamDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<ExceptionDoc>,
}

entity_identity!(Method);

impl Method {
    /// Documentation of a parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamDoc> {
        self.params.iter().find(|p| p.name == name)
    }
}

impl Documentable for Method {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }

    fn derive_extra(&mut self) {
        let Some(tree) = self.base.comment_tree().cloned() else {
            return;
        };
        self.params = collect_params(&tree, "param");
        self.type_params = collect_params(&tree, "typeparam");
        self.returns = tree.text_of("returns");
        self.exceptions = tree
            .select_all("exception")
            .map(ExceptionDoc::from_node)
            .collect();
    }
}

/// A property or indexer
#[derive(Debug, Clone, Default, Serialize)]
pub struct Property {
    #[serde(flatten)]
    pub base: ModelBase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,
}

entity_identity!(Property);

impl Documentable for Property {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }

    fn derive_extra(&mut self) {
        if let Some(tree) = self.base.comment_tree() {
            self.value = tree.text_of("value");
            self.params = collect_params(tree, "param");
        }
    }
}

/// A field or enum member
#[derive(Debug, Clone, Default, Serialize)]
pub struct Field {
    #[serde(flatten)]
    pub base: ModelBase,
}

entity_identity!(Field);

impl Documentable for Field {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}

/// An event
#[derive(Debug, Clone, Default, Serialize)]
pub struct Event {
    #[serde(flatten)]
    pub base: ModelBase,
}

entity_identity!(Event);

impl Documentable for Event {
    fn base(&self) -> &ModelBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }
}

/// Any documented entity, tagged by kind
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Namespace(Namespace),
    Type(TypeModel),
    Method(Method),
    Property(Property),
    Field(Field),
    Event(Event),
    /// Member whose id has no recognised kind prefix
    Other(ModelBase),
}

impl Entity {
    /// Wrap a base into the entity variant for `kind`
    ///
    /// No derivation runs here; assign the comment tree afterwards.
    pub fn from_base(kind: MemberKind, base: ModelBase) -> Self {
        match kind {
            MemberKind::Namespace => Entity::Namespace(base.into()),
            MemberKind::Type => Entity::Type(base.into()),
            MemberKind::Method => Entity::Method(base.into()),
            MemberKind::Property => Entity::Property(base.into()),
            MemberKind::Field => Entity::Field(base.into()),
            MemberKind::Event => Entity::Event(base.into()),
            MemberKind::Unknown => Entity::Other(base),
        }
    }

    /// Kind of this entity
    pub fn kind(&self) -> MemberKind {
        match self {
            Entity::Namespace(_) => MemberKind::Namespace,
            Entity::Type(_) => MemberKind::Type,
            Entity::Method(_) => MemberKind::Method,
            Entity::Property(_) => MemberKind::Property,
            Entity::Field(_) => MemberKind::Field,
            Entity::Event(_) => MemberKind::Event,
            Entity::Other(_) => MemberKind::Unknown,
        }
    }

    fn as_documentable(&self) -> &dyn Documentable {
        match self {
            Entity::Namespace(e) => e,
            Entity::Type(e) => e,
            Entity::Method(e) => e,
            Entity::Property(e) => e,
            Entity::Field(e) => e,
            Entity::Event(e) => e,
            Entity::Other(e) => e,
        }
    }

    fn as_documentable_mut(&mut self) -> &mut dyn Documentable {
        match self {
            Entity::Namespace(e) => e,
            Entity::Type(e) => e,
            Entity::Method(e) => e,
            Entity::Property(e) => e,
            Entity::Field(e) => e,
            Entity::Event(e) => e,
            Entity::Other(e) => e,
        }
    }
}

impl Documentable for Entity {
    fn base(&self) -> &ModelBase {
        self.as_documentable().base()
    }

    fn base_mut(&mut self) -> &mut ModelBase {
        self.as_documentable_mut().base_mut()
    }

    fn derive_extra(&mut self) {
        self.as_documentable_mut().derive_extra()
    }
}
