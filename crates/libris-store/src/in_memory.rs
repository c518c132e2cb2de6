//! `HashMap`-backed implementation of the `Repository` trait.

use std::collections::HashMap;

use libris_core::error::LendingError;
use libris_core::repository::{Entity, Repository};

/// In-memory keyed repository.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    entries: HashMap<String, T>,
}

impl<T> InMemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> FromIterator<T> for InMemoryRepository<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|entity| (entity.key().to_owned(), entity))
            .collect();
        Self { entries }
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn find(&self, key: &str) -> Result<Option<T>, LendingError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, entity: T) -> Result<(), LendingError> {
        let key = entity.key().to_owned();
        tracing::trace!(%key, "saving entity");
        self.entries.insert(key, entity);
        Ok(())
    }
}
