//! MySQL implementation of the StoreRepository trait.
//!
//! A store row and its address row live or die together, so create and
//! delete run inside a transaction.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mc_core::domain::entities::address::{Address, AddressOwner};
use mc_core::domain::entities::store::Store;
use mc_core::errors::DomainError;
use mc_core::repositories::StoreRepository;

use crate::database::uuid_bin::{bin_to_uuid, uuid_to_bin};

use super::internal;

const STORE_SELECT: &str = r#"
    SELECT s.id, s.account_id, s.phone, s.verified,
           ad.id AS address_id, ad.street, ad.apartment, ad.city, ad.zip, ad.country
    FROM store s
    INNER JOIN address ad ON ad.store_id = s.id
"#;

/// MySQL implementation of StoreRepository
pub struct MySqlStoreRepository {
    pool: MySqlPool,
}

impl MySqlStoreRepository {
    /// Create a new MySQL store repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_store(row: &MySqlRow) -> Result<Store, DomainError> {
        let id: Vec<u8> = row.try_get("id").map_err(internal("store.id"))?;
        let account_id: Vec<u8> = row
            .try_get("account_id")
            .map_err(internal("store.account_id"))?;
        let address_id: Vec<u8> = row
            .try_get("address_id")
            .map_err(internal("address.id"))?;

        let store_id = bin_to_uuid(&id)?;
        Ok(Store {
            id: store_id,
            account_id: bin_to_uuid(&account_id)?,
            phone: row.try_get("phone").map_err(internal("store.phone"))?,
            verified: row
                .try_get("verified")
                .map_err(internal("store.verified"))?,
            address: Address {
                id: bin_to_uuid(&address_id)?,
                owner: AddressOwner::Store(store_id),
                street: row.try_get("street").map_err(internal("address.street"))?,
                apartment: row
                    .try_get("apartment")
                    .map_err(internal("address.apartment"))?,
                city: row.try_get("city").map_err(internal("address.city"))?,
                zip: row.try_get("zip").map_err(internal("address.zip"))?,
                country: row
                    .try_get("country")
                    .map_err(internal("address.country"))?,
            },
        })
    }
}

#[async_trait]
impl StoreRepository for MySqlStoreRepository {
    async fn create(&self, store: &Store) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(internal("begin store insert"))?;

        sqlx::query(
            r#"
            INSERT INTO store (id, account_id, phone, verified)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(uuid_to_bin(store.id))
        .bind(uuid_to_bin(store.account_id))
        .bind(&store.phone)
        .bind(store.verified)
        .execute(&mut *tx)
        .await
        .map_err(internal("insert store"))?;

        sqlx::query(
            r#"
            INSERT INTO address (id, account_id, store_id, street, apartment, city, zip, country)
            VALUES (?, NULL, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid_to_bin(store.address.id))
        .bind(uuid_to_bin(store.id))
        .bind(&store.address.street)
        .bind(&store.address.apartment)
        .bind(&store.address.city)
        .bind(&store.address.zip)
        .bind(&store.address.country)
        .execute(&mut *tx)
        .await
        .map_err(internal("insert store address"))?;

        tx.commit().await.map_err(internal("commit store insert"))
    }

    async fn find_by_id(&self, store_id: Uuid) -> Result<Option<Store>, DomainError> {
        let query = format!("{STORE_SELECT} WHERE s.id = ?");
        let row = sqlx::query(&query)
            .bind(uuid_to_bin(store_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select store"))?;

        row.as_ref().map(Self::row_to_store).transpose()
    }

    async fn delete(&self, store_id: Uuid) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(internal("begin store delete"))?;

        sqlx::query("DELETE FROM address WHERE store_id = ?")
            .bind(uuid_to_bin(store_id))
            .execute(&mut *tx)
            .await
            .map_err(internal("delete store address"))?;

        let result = sqlx::query("DELETE FROM store WHERE id = ?")
            .bind(uuid_to_bin(store_id))
            .execute(&mut *tx)
            .await
            .map_err(internal("delete store"))?;

        tx.commit().await.map_err(internal("commit store delete"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Store>, DomainError> {
        let query = format!("{STORE_SELECT} WHERE s.account_id = ? ORDER BY s.id");
        let rows = sqlx::query(&query)
            .bind(uuid_to_bin(account_id))
            .fetch_all(&self.pool)
            .await
            .map_err(internal("select stores by account"))?;

        rows.iter().map(Self::row_to_store).collect()
    }
}
