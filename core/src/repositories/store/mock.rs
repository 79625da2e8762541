//! Mock implementation of StoreRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::store::Store;
use crate::errors::DomainError;

use super::r#trait::StoreRepository;

/// Mock store repository for testing
pub struct MockStoreRepository {
    stores: Arc<RwLock<HashMap<Uuid, Store>>>,
}

impl MockStoreRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            stores: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockStoreRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreRepository for MockStoreRepository {
    async fn create(&self, store: &Store) -> Result<(), DomainError> {
        let mut stores = self.stores.write().await;
        stores.insert(store.id, store.clone());
        Ok(())
    }

    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, DomainError> {
        let stores = self.stores.read().await;
        Ok(stores.get(&store_id).cloned())
    }

    async fn delete(&self, store_id: Uuid) -> Result<bool, DomainError> {
        let mut stores = self.stores.write().await;
        Ok(stores.remove(&store_id).is_some())
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Store>, DomainError> {
        let stores = self.stores.read().await;
        Ok(stores
            .values()
            .filter(|s| s.account_id == account_id)
            .cloned()
            .collect())
    }
}
