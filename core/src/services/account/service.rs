//! Main account service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::domain::entities::address::{Address, AddressOwner};
use crate::domain::entities::store::Store;
use crate::domain::value_objects::actor::Actor;
use crate::domain::value_objects::auth_response::AuthenticatedAccount;
use crate::domain::value_objects::patch::{AccountPatch, ProfilePatch};
use crate::domain::value_objects::registration::{NewAccount, NewAddress, NewStore};
use crate::domain::value_objects::views::{AccountInfo, PartialAccount};
use crate::errors::{AccountError, AuthError, DomainError, ValidationError};
use crate::repositories::{AccountRepository, StoreRepository, TokenRepository};
use crate::services::auth::password;
use crate::services::token::TokenService;
use mc_shared::types::pagination::{Pagination, DEFAULT_PAGE_SIZE, SEARCH_RESULT_CAP};
use mc_shared::utils::validation;

/// Service owning the account lifecycle and admin queries.
///
/// Generic over its repositories so tests can inject mocks.
pub struct AccountService<A, T, S>
where
    A: AccountRepository,
    T: TokenRepository,
    S: StoreRepository,
{
    accounts: Arc<A>,
    tokens: Arc<T>,
    stores: Arc<S>,
    token_service: Arc<TokenService>,
    bcrypt_cost: u32,
}

impl<A, T, S> AccountService<A, T, S>
where
    A: AccountRepository,
    T: TokenRepository,
    S: StoreRepository,
{
    /// Creates a new account service
    pub fn new(
        accounts: Arc<A>,
        tokens: Arc<T>,
        stores: Arc<S>,
        token_service: Arc<TokenService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            accounts,
            tokens,
            stores,
            token_service,
            bcrypt_cost,
        }
    }

    /// Register a new account and open its first session.
    ///
    /// Account, metadata, and profile are written atomically; a unique-key
    /// conflict surfaces as the field-specific error with nothing persisted.
    pub async fn register(&self, request: NewAccount) -> Result<AuthenticatedAccount, DomainError> {
        // Step 1: validate the inbound fields
        if !validation::is_valid_email(&request.email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !validation::is_valid_username(&request.username) {
            return Err(ValidationError::InvalidUsername.into());
        }
        if let Err(reason) = validation::check_password_strength(&request.password) {
            return Err(ValidationError::WeakPassword {
                reason: reason.to_string(),
            }
            .into());
        }
        if !request.profile_matches_role() {
            return Err(AccountError::ProfileRoleMismatch.into());
        }

        // Step 2: hash the password and build the entities
        let password_hash = password::hash_password(&request.password, self.bcrypt_cost)?;
        let account = Account::new(
            request.email.clone(),
            request.username,
            password_hash,
            request.role,
        );
        let profile = request.profile.into_profile(&request.email);

        // Step 3: atomic insert
        self.accounts.create(&account, &profile).await?;
        info!(account_id = %account.id, role = %account.meta.role, "account registered");

        // Step 4: open the first session
        let tokens = self
            .token_service
            .open_session(self.tokens.as_ref(), &account, &request.device)
            .await?;

        Ok(AuthenticatedAccount::new(
            PartialAccount::from(&account),
            tokens,
        ))
    }

    /// Full aggregate for the account's own view
    pub async fn get_info(&self, account_id: Uuid) -> Result<AccountInfo, DomainError> {
        let account = self.load_account(account_id).await?;
        self.build_info(&account).await
    }

    /// Apply partial updates to the account row and its profile.
    ///
    /// An update with nothing in it is rejected outright. Account and
    /// profile writes go through a single repository transaction.
    pub async fn update_account(
        &self,
        account_id: Uuid,
        account_patch: AccountPatch,
        profile_patch: Option<ProfilePatch>,
    ) -> Result<AccountInfo, DomainError> {
        let profile_changes = profile_patch.as_ref().is_some_and(|p| !p.is_empty());
        if account_patch.is_empty() && !profile_changes {
            return Err(AccountError::EmptyUpdate.into());
        }

        let mut account = self.load_account(account_id).await?;

        // Account-level fields
        if let Some(email) = account_patch.email {
            if !validation::is_valid_email(&email) {
                return Err(ValidationError::InvalidEmail.into());
            }
            account.email = email;
        }
        if let Some(username) = account_patch.username {
            if !validation::is_valid_username(&username) {
                return Err(ValidationError::InvalidUsername.into());
            }
            account.username = username;
        }
        if let Some(plain) = account_patch.password {
            if let Err(reason) = validation::check_password_strength(&plain) {
                return Err(ValidationError::WeakPassword {
                    reason: reason.to_string(),
                }
                .into());
            }
            account.password_hash = password::hash_password(&plain, self.bcrypt_cost)?;
        }
        account.meta.updated_at = chrono::Utc::now();

        // Profile-level fields
        let updated_profile = match profile_patch {
            Some(patch) if !patch.is_empty() => {
                if patch.group() != account.meta.role.group() {
                    return Err(AccountError::ProfileRoleMismatch.into());
                }
                let mut profile = self
                    .accounts
                    .find_profile(account_id)
                    .await?
                    .ok_or_else(|| {
                        warn!(%account_id, "account has no profile row for its role");
                        AccountError::ProfileDesync
                    })?;
                if !patch.apply(&mut profile) {
                    return Err(AccountError::ProfileDesync.into());
                }
                Some(profile)
            }
            _ => None,
        };

        self.accounts
            .update(&account, updated_profile.as_ref())
            .await?;

        self.build_info(&account).await
    }

    /// Add an address owned directly by the account
    pub async fn add_address(
        &self,
        account_id: Uuid,
        input: NewAddress,
    ) -> Result<Address, DomainError> {
        self.load_account(account_id).await?;

        let address = Address::new(
            AddressOwner::Account(account_id),
            input.street,
            input.apartment,
            input.city,
            input.zip,
            input.country,
        );
        self.accounts.add_address(&address).await?;
        Ok(address)
    }

    /// Delete an address; only its owner may do so.
    ///
    /// An address owned by someone else is reported as not found rather
    /// than forbidden, so address IDs cannot be probed.
    pub async fn delete_address(
        &self,
        account_id: Uuid,
        address_id: Uuid,
    ) -> Result<(), DomainError> {
        let address = self
            .accounts
            .find_address(address_id)
            .await?
            .ok_or(AccountError::AddressNotFound)?;
        if !address.belongs_to_account(account_id) {
            return Err(AccountError::AddressNotFound.into());
        }

        self.accounts.delete_address(address_id).await?;
        Ok(())
    }

    /// Create a store with its address in one step
    pub async fn add_store(&self, account_id: Uuid, input: NewStore) -> Result<Store, DomainError> {
        self.load_account(account_id).await?;

        let store_id = Uuid::new_v4();
        let address = Address::new(
            AddressOwner::Store(store_id),
            input.address.street,
            input.address.apartment,
            input.address.city,
            input.address.zip,
            input.address.country,
        );
        let store = Store {
            id: store_id,
            account_id,
            phone: input.phone,
            verified: false,
            address,
        };

        self.stores.create(&store).await?;
        Ok(store)
    }

    /// Delete a store; only its owner may do so
    pub async fn delete_store(&self, account_id: Uuid, store_id: Uuid) -> Result<(), DomainError> {
        let store = self
            .stores
            .find_by_id(store_id)
            .await?
            .ok_or(AccountError::StoreNotFound)?;
        if store.account_id != account_id {
            return Err(AccountError::StoreNotFound.into());
        }

        self.stores.delete(store_id).await?;
        Ok(())
    }

    /// Close the account at the owner's request.
    ///
    /// Requires the password again. The row is kept with status `Closed`;
    /// every live session is revoked.
    pub async fn close_account(
        &self,
        account_id: Uuid,
        plain_password: &str,
    ) -> Result<(), DomainError> {
        let mut account = self.load_account(account_id).await?;

        if !password::verify_password(plain_password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        account.close(account_id);
        self.accounts.update(&account, None).await?;
        self.tokens.delete_all_for_account(account_id).await?;
        info!(%account_id, "account closed by owner");
        Ok(())
    }

    /// Toggle a target account between Active and Banned.
    ///
    /// Admin only. Banning revokes the target's sessions; a closed account
    /// is left untouched.
    pub async fn set_banned(
        &self,
        acting_admin: Uuid,
        target_username: &str,
    ) -> Result<AccountStatus, DomainError> {
        self.require_admin(acting_admin).await?;

        let mut target = self
            .accounts
            .find_by_username(target_username)
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        let status = target.toggle_banned(acting_admin);
        self.accounts.update(&target, None).await?;

        if status == AccountStatus::Banned {
            self.tokens.delete_all_for_account(target.id).await?;
        }
        info!(admin = %acting_admin, target = %target.id, %status, "ban toggle");
        Ok(status)
    }

    /// Banned accounts, most recently suspended first. Admin only.
    pub async fn banned_list(
        &self,
        acting_admin: Uuid,
        limit: Option<u32>,
    ) -> Result<Vec<PartialAccount>, DomainError> {
        self.require_admin(acting_admin).await?;

        let page = Pagination::new(0, limit.unwrap_or(DEFAULT_PAGE_SIZE));
        self.accounts.list_banned(&page).await
    }

    /// Paginated account listing, banned accounts excluded. Admin only.
    pub async fn account_list(
        &self,
        acting_admin: Uuid,
        page: Pagination,
    ) -> Result<Vec<PartialAccount>, DomainError> {
        self.require_admin(acting_admin).await?;
        self.accounts.list_accounts(&page).await
    }

    /// Substring search over usernames, emails, and profile text.
    ///
    /// Admin only. Unlike `account_list` this includes banned accounts, so
    /// moderators can find the accounts they suspended.
    pub async fn search(
        &self,
        acting_admin: Uuid,
        term: &str,
    ) -> Result<Vec<PartialAccount>, DomainError> {
        self.require_admin(acting_admin).await?;

        if term.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "term".to_string(),
            }
            .into());
        }

        let page = Pagination::new(0, SEARCH_RESULT_CAP);
        self.accounts.search(term.trim(), &page).await
    }

    /// Full aggregate for another account, for admins and sibling services
    pub async fn get_account_info(
        &self,
        actor: Actor,
        username: &str,
    ) -> Result<AccountInfo, DomainError> {
        self.require_admin_or_service(&actor).await?;

        let account = self
            .accounts
            .find_by_username(username)
            .await?
            .ok_or(AccountError::AccountNotFound)?;
        self.build_info(&account).await
    }

    /// Bulk partial views, for admins and sibling services.
    ///
    /// Unknown IDs are silently skipped.
    pub async fn get_account_list_info(
        &self,
        actor: Actor,
        ids: &[Uuid],
    ) -> Result<Vec<PartialAccount>, DomainError> {
        self.require_admin_or_service(&actor).await?;
        self.accounts.find_partials_by_ids(ids).await
    }

    async fn load_account(&self, account_id: Uuid) -> Result<Account, DomainError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AccountError::AccountNotFound.into())
    }

    async fn require_admin(&self, account_id: Uuid) -> Result<Account, DomainError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::AdminRequired)?;
        if account.meta.role != Role::Admin || !account.is_active() {
            return Err(AccountError::AdminRequired.into());
        }
        Ok(account)
    }

    async fn require_admin_or_service(&self, actor: &Actor) -> Result<(), DomainError> {
        match actor {
            Actor::Service(name) => {
                info!(service = %name, "internal lookup");
                Ok(())
            }
            Actor::Account(id) => self.require_admin(*id).await.map(|_| ()),
        }
    }

    async fn build_info(&self, account: &Account) -> Result<AccountInfo, DomainError> {
        let profile = self
            .accounts
            .find_profile(account.id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account.id, "account has no profile row for its role");
                AccountError::ProfileDesync
            })?;
        let addresses = self.accounts.list_addresses(account.id).await?;
        let stores = self.stores.list_by_account(account.id).await?;

        Ok(AccountInfo {
            account: PartialAccount::from(account),
            profile,
            addresses,
            stores,
        })
    }
}
