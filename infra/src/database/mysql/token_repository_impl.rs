//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh tokens are stored by their SHA-256 hash; the raw signed token
//! never reaches this layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use mc_core::domain::entities::token::RefreshToken;
use mc_core::errors::DomainError;
use mc_core::repositories::TokenRepository;

use crate::database::uuid_bin::{bin_to_uuid, uuid_to_bin};

use super::internal;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let account_id: Vec<u8> = row
            .try_get("account_id")
            .map_err(internal("refresh_token.account_id"))?;

        Ok(RefreshToken {
            token_hash: row
                .try_get("token_hash")
                .map_err(internal("refresh_token.token_hash"))?,
            account_id: bin_to_uuid(&account_id)?,
            device: row
                .try_get("device")
                .map_err(internal("refresh_token.device"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(internal("refresh_token.created_at"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(internal("refresh_token.expires_at"))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_token (token_hash, account_id, device, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
        "#;
        sqlx::query(query)
            .bind(&token.token_hash)
            .bind(uuid_to_bin(token.account_id))
            .bind(&token.device)
            .bind(token.created_at)
            .bind(token.expires_at)
            .execute(&self.pool)
            .await
            .map_err(internal("insert refresh_token"))?;

        Ok(token)
    }

    async fn find(
        &self,
        account_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT token_hash, account_id, device, created_at, expires_at
            FROM refresh_token
            WHERE token_hash = ? AND account_id = ?
        "#;
        let row = sqlx::query(query)
            .bind(token_hash)
            .bind(uuid_to_bin(account_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("select refresh_token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_token WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(internal("delete refresh_token"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_token WHERE account_id = ?")
            .bind(uuid_to_bin(account_id))
            .execute(&self.pool)
            .await
            .map_err(internal("delete refresh_token by account"))?;

        Ok(result.rows_affected() as usize)
    }
}
