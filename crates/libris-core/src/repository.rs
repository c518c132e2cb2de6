//! Keyed storage abstraction for catalog and membership.

use crate::error::LendingError;

/// An entity stored under a natural key (isbn, member id).
pub trait Entity: Clone + Send + Sync {
    /// Returns the natural key identifying this entity.
    fn key(&self) -> &str;
}

/// Keyed upsert/lookup storage.
///
/// This is the only access pattern the lending core needs, so a durable
/// backend can replace the in-memory one without touching orchestration.
pub trait Repository<T: Entity>: Send + Sync {
    /// Looks up an entity by key, returning an owned copy.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if the backend fails.
    fn find(&self, key: &str) -> Result<Option<T>, LendingError>;

    /// Inserts or replaces the entity stored under `entity.key()`.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if the backend fails.
    fn save(&mut self, entity: T) -> Result<(), LendingError>;
}
