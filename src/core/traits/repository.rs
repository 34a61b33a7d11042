use async_trait::async_trait;
use crate::core::Result;

/// Base repository trait for CRUD operations
///
/// `T` is the stored entity, `D` the validated input used to create or
/// replace it, `ID` its key.
#[async_trait]
pub trait Repository<T, D, ID>: Send + Sync {
    /// List all entities
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>>;

    /// Create a new entity
    async fn create(&self, draft: D) -> Result<T>;

    /// Replace an existing entity. Returns `None` when the ID is unknown.
    async fn update(&self, id: ID, draft: D) -> Result<Option<T>>;

    /// Delete an entity by ID. Returns `false` when nothing was removed.
    async fn delete(&self, id: ID) -> Result<bool>;
}
