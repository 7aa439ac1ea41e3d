// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use delegate::delegate;
use serde::{Deserialize, Serialize};

/// Holds [Entities](Entity) by name, in the order they were added.
///
/// Names are unique within a collection. There is no way to
/// replace or remove an entity once it's been added.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T: Entity> {
    items: Vec<T>,
}
impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Default::default(),
        }
    }
}
impl<T: Entity> Collection<T> {
    /// Appends `entity`. Fails with [ComposerError::DuplicateName] if an
    /// entity of the same name is already present, in which case the
    /// collection is unchanged.
    pub fn add(&mut self, entity: T) -> Result<&T, ComposerError> {
        if self.contains(entity.name()) {
            return Err(ComposerError::DuplicateName {
                kind: T::KIND,
                name: entity.name().to_string(),
            });
        }
        log::debug!("adding {} '{}'", T::KIND, entity.name());
        self.items.push(entity);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Returns the entity with the given name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|e| e.name() == name)
    }

    #[allow(missing_docs)]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the names of all entities, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|e| e.name())
    }

    pub(crate) fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    delegate! {
        to self.items {
            /// Returns the earliest-added entity.
            pub fn first(&self) -> Option<&T>;
            /// Iterates over entities in insertion order.
            pub fn iter(&self) -> core::slice::Iter<'_, T>;
            #[allow(missing_docs)]
            pub fn len(&self) -> usize;
            #[allow(missing_docs)]
            pub fn is_empty(&self) -> bool;
        }
    }
}
impl<'a, T: Entity> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Named(String, u8);
    impl Entity for Named {
        const KIND: &'static str = "thing";

        fn name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn collection_mainline() {
        let mut c = Collection::<Named>::default();
        assert!(c.is_empty(), "default collection should be empty");
        assert!(c.first().is_none());

        assert!(c.add(Named("b".to_string(), 1)).is_ok());
        assert!(c.add(Named("a".to_string(), 2)).is_ok());
        assert!(c.add(Named("c".to_string(), 3)).is_ok());
        assert_eq!(
            c.names().collect::<Vec<_>>(),
            vec!["b", "a", "c"],
            "iteration should follow insertion order, not name order"
        );
        assert_eq!(c.first().map(|e| e.1), Some(1));
        assert_eq!(c.get("a").map(|e| e.1), Some(2));
        assert!(c.get("z").is_none(), "lookup of an unknown name returns None");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut c = Collection::<Named>::default();
        assert!(c.add(Named("bass".to_string(), 1)).is_ok());

        let e = c.add(Named("bass".to_string(), 2)).unwrap_err();
        assert_eq!(
            e,
            ComposerError::DuplicateName {
                kind: "thing",
                name: "bass".to_string()
            }
        );
        assert_eq!(c.len(), 1, "failed add should leave the collection alone");
        assert_eq!(
            c.get("bass"),
            Some(&Named("bass".to_string(), 1)),
            "the original entity should be untouched"
        );
    }

    #[test]
    fn serializes_as_ordered_list() {
        let mut c = Collection::<Named>::default();
        let _ = c.add(Named("z".to_string(), 1));
        let _ = c.add(Named("y".to_string(), 2));
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"[["z",1],["y",2]]"#);

        let c: Collection<Named> = serde_json::from_str(&json).unwrap();
        assert_eq!(c.names().collect::<Vec<_>>(), vec!["z", "y"]);
    }
}
