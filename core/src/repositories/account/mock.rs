//! Mock implementation of AccountRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus};
use crate::domain::entities::address::Address;
use crate::domain::entities::profile::Profile;
use crate::domain::value_objects::views::PartialAccount;
use crate::errors::{AccountError, DomainError};
use mc_shared::types::pagination::Pagination;

use super::r#trait::AccountRepository;

/// Mock account repository for testing
///
/// Enforces the same unique constraints as the MySQL implementation so
/// conflict paths can be exercised without a database.
pub struct MockAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
    addresses: Arc<RwLock<HashMap<Uuid, Address>>>,
}

impl MockAccountRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            profiles: Arc::new(RwLock::new(HashMap::new())),
            addresses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored accounts, for rollback assertions
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Number of stored profiles, for rollback assertions
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }

    fn check_unique(
        accounts: &HashMap<Uuid, Account>,
        profiles: &HashMap<Uuid, Profile>,
        account: &Account,
        profile: Option<&Profile>,
    ) -> Result<(), DomainError> {
        for existing in accounts.values() {
            if existing.id == account.id {
                continue;
            }
            if existing.email == account.email {
                return Err(AccountError::EmailTaken.into());
            }
            if existing.username == account.username {
                return Err(AccountError::UsernameTaken.into());
            }
        }
        if let Some(Profile::Admin(admin)) = profile {
            for (owner, existing) in profiles.iter() {
                if *owner == account.id {
                    continue;
                }
                if let Profile::Admin(other) = existing {
                    if other.public_name == admin.public_name {
                        return Err(AccountError::PublicNameTaken.into());
                    }
                }
            }
        }
        Ok(())
    }

    fn profile_text_matches(profile: &Profile, needle: &str) -> bool {
        match profile {
            Profile::User(p) => {
                p.firstname.to_lowercase().contains(needle)
                    || p.lastname.to_lowercase().contains(needle)
            }
            Profile::Business(p) => {
                p.title.to_lowercase().contains(needle)
                    || p.bio
                        .as_deref()
                        .is_some_and(|bio| bio.to_lowercase().contains(needle))
            }
            Profile::Admin(p) => p.public_name.to_lowercase().contains(needle),
        }
    }
}

impl Default for MockAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, account: &Account, profile: &Profile) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut profiles = self.profiles.write().await;

        Self::check_unique(&accounts, &profiles, account, Some(profile))?;

        accounts.insert(account.id, account.clone());
        profiles.insert(account.id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.email == identifier)
            .or_else(|| accounts.values().find(|a| a.username == identifier))
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn update(
        &self,
        account: &Account,
        profile: Option<&Profile>,
    ) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let mut profiles = self.profiles.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AccountError::AccountNotFound.into());
        }
        Self::check_unique(&accounts, &profiles, account, profile)?;

        if let Some(profile) = profile {
            let stored = profiles
                .get(&account.id)
                .ok_or(AccountError::ProfileDesync)?;
            if stored.group() != profile.group() {
                return Err(AccountError::ProfileDesync.into());
            }
            profiles.insert(account.id, profile.clone());
        }

        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn find_profile(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&account_id).cloned())
    }

    async fn add_address(&self, address: &Address) -> Result<(), DomainError> {
        let mut addresses = self.addresses.write().await;
        addresses.insert(address.id, address.clone());
        Ok(())
    }

    async fn find_address(&self, address_id: Uuid) -> Result<Option<Address>, DomainError> {
        let addresses = self.addresses.read().await;
        Ok(addresses.get(&address_id).cloned())
    }

    async fn delete_address(&self, address_id: Uuid) -> Result<bool, DomainError> {
        let mut addresses = self.addresses.write().await;
        Ok(addresses.remove(&address_id).is_some())
    }

    async fn list_addresses(&self, account_id: Uuid) -> Result<Vec<Address>, DomainError> {
        let addresses = self.addresses.read().await;
        Ok(addresses
            .values()
            .filter(|a| a.belongs_to_account(account_id))
            .cloned()
            .collect())
    }

    async fn list_banned(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        let mut banned: Vec<&Account> = accounts
            .values()
            .filter(|a| a.meta.status == AccountStatus::Banned)
            .collect();
        banned.sort_by(|a, b| b.meta.status_changed_at.cmp(&a.meta.status_changed_at));

        Ok(banned
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(PartialAccount::from)
            .collect())
    }

    async fn list_accounts(&self, page: &Pagination) -> Result<Vec<PartialAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        let mut listed: Vec<&Account> = accounts
            .values()
            .filter(|a| a.meta.status != AccountStatus::Banned)
            .collect();
        listed.sort_by(|a, b| a.meta.created_at.cmp(&b.meta.created_at));

        Ok(listed
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(PartialAccount::from)
            .collect())
    }

    async fn search(
        &self,
        term: &str,
        page: &Pagination,
    ) -> Result<Vec<PartialAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        let profiles = self.profiles.read().await;
        let needle = term.to_lowercase();

        let mut matched: Vec<&Account> = accounts
            .values()
            .filter(|a| {
                a.username.to_lowercase().contains(&needle)
                    || a.email.to_lowercase().contains(&needle)
                    || profiles
                        .get(&a.id)
                        .is_some_and(|p| Self::profile_text_matches(p, &needle))
            })
            .collect();
        matched.sort_by(|a, b| a.username.cmp(&b.username));

        Ok(matched
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .map(PartialAccount::from)
            .collect())
    }

    async fn find_partials_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<PartialAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| accounts.get(id).map(PartialAccount::from))
            .collect())
    }
}
