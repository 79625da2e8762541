//! Store repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::store::Store;
use crate::errors::DomainError;

/// Repository trait for Store entity persistence
///
/// A store and its address are written atomically; deleting a store also
/// removes its address row.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Persist a new store together with its address
    async fn create(&self, store: &Store) -> Result<(), DomainError>;

    /// Find a store by its ID
    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, DomainError>;

    /// Delete a store and its address.
    ///
    /// # Returns
    /// * `Ok(true)` - Store deleted
    /// * `Ok(false)` - No such store
    async fn delete(&self, store_id: Uuid) -> Result<bool, DomainError>;

    /// List all stores owned by an account
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Store>, DomainError>;
}
