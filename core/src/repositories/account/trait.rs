//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::address::Address;
use crate::domain::entities::profile::Profile;
use crate::domain::value_objects::views::PartialAccount;
use crate::errors::DomainError;
use mc_shared::types::pagination::Pagination;

/// Repository trait for Account entity persistence operations
///
/// Implementations must create the account row, its metadata, and its
/// profile row atomically, and must translate storage-level unique-key
/// violations into the field-specific conflict errors
/// (`AccountError::EmailTaken` and friends).
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist a new account together with its profile row.
    ///
    /// All-or-nothing: a failure on any row leaves no trace of the account.
    ///
    /// # Returns
    /// * `Ok(())` - Account, metadata, and profile were all written
    /// * `Err(DomainError)` - Field-specific conflict or storage failure
    async fn create(&self, account: &Account, profile: &Profile) -> Result<(), DomainError>;

    /// Find an account by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by email or username.
    ///
    /// Login accepts either; the lookup tries email first, then username.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Persist changes to an existing account row and, when given, its
    /// profile row, in a single transaction.
    ///
    /// Covers credential updates and status transitions alike. The profile
    /// variant must match the stored role group; implementations return
    /// `AccountError::ProfileDesync` when no matching row exists.
    async fn update(
        &self,
        account: &Account,
        profile: Option<&Profile>,
    ) -> Result<(), DomainError>;

    /// Load the profile row matching the account's role group.
    ///
    /// # Returns
    /// * `Ok(Some(Profile))` - The account's one profile
    /// * `Ok(None)` - No profile row exists (role/profile desync)
    async fn find_profile(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Persist a new address row
    async fn add_address(&self, address: &Address) -> Result<(), DomainError>;

    /// Find an address by its ID
    async fn find_address(&self, address_id: Uuid) -> Result<Option<Address>, DomainError>;

    /// Delete an address row.
    ///
    /// # Returns
    /// * `Ok(true)` - Address deleted
    /// * `Ok(false)` - No such address
    async fn delete_address(&self, address_id: Uuid) -> Result<bool, DomainError>;

    /// List all addresses owned directly by an account
    async fn list_addresses(&self, account_id: Uuid) -> Result<Vec<Address>, DomainError>;

    /// List banned accounts, most recently suspended first
    async fn list_banned(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError>;

    /// List accounts excluding banned ones, ordered by creation time
    async fn list_accounts(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError>;

    /// Search accounts whose username, email, or profile text contains the
    /// term. Banned accounts are included.
    async fn search(&self, term: &str, page: &Pagination)
        -> Result<Vec<PartialAccount>, DomainError>;

    /// Bulk partial views for internal callers; unknown IDs are skipped
    async fn find_partials_by_ids(&self, ids: &[Uuid])
        -> Result<Vec<PartialAccount>, DomainError>;
}
