//! Entity index keyed by identity

use super::base::Documentable;
use super::entities::Entity;
use super::links::SeeAlso;
use crate::types::MemberKind;
use std::collections::HashMap;

/// Lookup of entities by id, preserving insertion order
///
/// Entities without an id share a single slot, the same way they compare
/// equal to each other.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    entities: Vec<Entity>,
    by_id: HashMap<Option<String>, usize>,
}

impl ModelIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity, replacing (and returning) one with the same identity
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        let key = entity.base().id.clone();
        match self.by_id.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.entities[pos], entity)),
            None => {
                self.by_id.insert(key, self.entities.len());
                self.entities.push(entity);
                None
            }
        }
    }

    /// Get an entity by id
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.by_id
            .get(&Some(id.to_string()))
            .map(|&pos| &self.entities[pos])
    }

    /// Check if an entity with the same identity is indexed
    pub fn contains(&self, entity: &impl Documentable) -> bool {
        self.by_id.contains_key(&entity.base().id)
    }

    /// Number of indexed entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities of a given kind, in insertion order
    pub fn by_kind(&self, kind: MemberKind) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind() == kind)
    }

    /// The indexed entity a see-also link points at
    pub fn resolve_see_also(&self, link: &SeeAlso) -> Option<&Entity> {
        self.get(link.target.as_deref()?)
    }
}

impl FromIterator<Entity> for ModelIndex {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut index = Self::new();
        for entity in iter {
            index.insert(entity);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::base::ModelBase;
    use pretty_assertions::assert_eq;

    fn entity(kind: MemberKind, id: &str) -> Entity {
        Entity::from_base(kind, ModelBase::with_id(id))
    }

    #[test]
    fn test_insert_and_get() {
        let mut index = ModelIndex::new();
        assert!(index.is_empty());
        index.insert(entity(MemberKind::Type, "T:Ns.A"));
        index.insert(entity(MemberKind::Method, "M:Ns.A.Run"));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("T:Ns.A").unwrap().kind(), MemberKind::Type);
        assert!(index.get("T:Ns.Missing").is_none());
    }

    #[test]
    fn test_insert_replaces_same_identity() {
        let mut index = ModelIndex::new();
        index.insert(entity(MemberKind::Type, "T:Ns.A"));

        let mut replacement = entity(MemberKind::Type, "T:Ns.A");
        replacement.base_mut().name = "A2".to_string();
        let old = index.insert(replacement).unwrap();

        assert_eq!(old.base().name, "");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("T:Ns.A").unwrap().base().name, "A2");
    }

    #[test]
    fn test_absent_ids_share_slot() {
        let mut index = ModelIndex::new();
        index.insert(Entity::Other(ModelBase::new()));
        let old = index.insert(Entity::Other(ModelBase::new()));
        assert!(old.is_some());
        assert_eq!(index.len(), 1);
        assert!(index.contains(&ModelBase::new()));
    }

    #[test]
    fn test_by_kind_keeps_order() {
        let index: ModelIndex = vec![
            entity(MemberKind::Method, "M:Ns.A.One"),
            entity(MemberKind::Type, "T:Ns.A"),
            entity(MemberKind::Method, "M:Ns.A.Two"),
        ]
        .into_iter()
        .collect();

        let methods: Vec<_> = index
            .by_kind(MemberKind::Method)
            .filter_map(|e| e.id())
            .collect();
        assert_eq!(methods, vec!["M:Ns.A.One", "M:Ns.A.Two"]);
    }

    #[test]
    fn test_resolve_see_also() {
        let index: ModelIndex = vec![entity(MemberKind::Type, "T:Ns.A")].into_iter().collect();
        assert!(index.resolve_see_also(&SeeAlso::to_entity("T:Ns.A")).is_some());
        assert!(index.resolve_see_also(&SeeAlso::to_entity("T:Ns.B")).is_none());
        assert!(index
            .resolve_see_also(&SeeAlso::to_url("https://example.com", "x"))
            .is_none());
    }
}
