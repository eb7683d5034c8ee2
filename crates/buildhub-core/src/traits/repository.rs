//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic CRUD repository trait.
///
/// Each entity gets a strongly typed repository through the type
/// parameters. Entity-specific operations are declared on extension
/// traits next to the concrete implementations.
///
/// `find_all` returns entities in insertion order.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find an entity by its primary key.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Return every entity in insertion order.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Create a new entity and return it.
    async fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Update an existing entity and return the stored version.
    ///
    /// Fails with a not-found error when the entity does not exist.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if deleted.
    async fn delete(&self, id: &Id) -> AppResult<bool>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}
