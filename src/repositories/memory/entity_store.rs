// src/repositories/memory/entity_store.rs
//
// Canonical records keyed by numeric id

use std::collections::BTreeMap;

use crate::domain::Entity;
use crate::error::{AppError, AppResult};

/// Id-keyed record store.
///
/// New ids are `1 + max present id`, so an id freed by deleting the highest
/// record can be handed out again. Only uniqueness among present records is
/// guaranteed.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Entity> {
    kind: &'static str,
    records: BTreeMap<u64, T>,
}

impl<T: Entity> EntityStore<T> {
    /// `kind` names the entity in NotFound messages ("film", "user")
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            records: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, mut entity: T) -> T {
        let id = self.next_id();
        entity.set_id(id);
        self.records.insert(id, entity.clone());
        entity
    }

    pub fn update(&mut self, entity: T) -> AppResult<T> {
        match self.records.get_mut(&entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(self.not_found(entity.id())),
        }
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.records.contains_key(&id)
    }

    /// Records in ascending id order
    pub fn list(&self) -> Vec<T> {
        self.records.values().cloned().collect()
    }

    pub fn delete(&mut self, id: u64) -> AppResult<T> {
        self.records.remove(&id).ok_or_else(|| self.not_found(id))
    }

    pub fn delete_all(&mut self) {
        self.records.clear();
    }

    pub fn not_found(&self, id: u64) -> AppError {
        AppError::NotFound(format!("{} {}", self.kind, id))
    }

    fn next_id(&self) -> u64 {
        self.records.keys().next_back().map_or(1, |max| max + 1)
    }
}
