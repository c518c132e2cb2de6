//! Test repositories — `Repository` implementations with scripted failures.

use libris_core::error::LendingError;
use libris_core::repository::{Entity, Repository};
use libris_store::InMemoryRepository;

/// A repository that serves lookups from preloaded entities but rejects every
/// write with an infrastructure error. Useful for exercising rollback paths.
#[derive(Debug)]
pub struct FailingRepository<T> {
    inner: InMemoryRepository<T>,
}

impl<T: Entity> FailingRepository<T> {
    /// Creates a repository preloaded with `entities`.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> Self {
        Self {
            inner: entities.into_iter().collect(),
        }
    }
}

impl<T: Entity> Repository<T> for FailingRepository<T> {
    fn find(&self, key: &str) -> Result<Option<T>, LendingError> {
        self.inner.find(key)
    }

    fn save(&mut self, _entity: T) -> Result<(), LendingError> {
        Err(LendingError::Infrastructure("disk full".into()))
    }
}
