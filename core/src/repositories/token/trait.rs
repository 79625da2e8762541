//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for refresh token persistence
///
/// Only token hashes ever reach an implementation; callers hash the signed
/// token before lookup or storage. One live token per account: issuing a
/// new token is always preceded by `delete_all_for_account`.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token row
    async fn save(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a token row by account and hash.
    ///
    /// Both must match; a hash presented with the wrong account ID is
    /// treated as absent.
    async fn find(
        &self,
        account_id: Uuid,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, DomainError>;

    /// Delete a single token row.
    ///
    /// # Returns
    /// * `Ok(true)` - Row deleted
    /// * `Ok(false)` - No such row
    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete every token row belonging to an account.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of rows deleted
    async fn delete_all_for_account(&self, account_id: Uuid) -> Result<usize, DomainError>;
}
