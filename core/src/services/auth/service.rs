//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus};
use crate::domain::value_objects::auth_response::AuthenticatedAccount;
use crate::domain::value_objects::views::PartialAccount;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{AccountRepository, TokenRepository};
use crate::services::token::TokenService;

use super::password;

/// Service handling login, refresh rotation, and logout.
///
/// Generic over its repositories so tests can inject mocks.
pub struct AuthService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    accounts: Arc<A>,
    tokens: Arc<T>,
    token_service: Arc<TokenService>,
}

impl<A, T> AuthService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    /// Creates a new authentication service
    pub fn new(accounts: Arc<A>, tokens: Arc<T>, token_service: Arc<TokenService>) -> Self {
        Self {
            accounts,
            tokens,
            token_service,
        }
    }

    /// Authenticate with email-or-username plus password.
    ///
    /// Unknown identifier and wrong password are indistinguishable to the
    /// caller: both return `InvalidCredentials`. Closed accounts get the
    /// same answer. A banned account is rejected before password
    /// verification with the distinct `AccountSuspended` error.
    pub async fn login(
        &self,
        identifier: &str,
        plain_password: &str,
        device: &str,
    ) -> Result<AuthenticatedAccount, DomainError> {
        // Step 1: resolve the identifier
        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Step 2: status gate, before touching the password
        self.check_status(&account)?;

        // Step 3: verify the password
        if !password::verify_password(plain_password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        // Step 4: rotate the session
        let tokens = self
            .token_service
            .open_session(self.tokens.as_ref(), &account, device)
            .await?;

        info!(account_id = %account.id, "login succeeded");
        Ok(AuthenticatedAccount::new(
            PartialAccount::from(&account),
            tokens,
        ))
    }

    /// Exchange a refresh token for a fresh pair.
    ///
    /// Tokens are single-use: a successful exchange deletes the presented
    /// row. An expired row is deleted on sight and reported distinctly so
    /// the client knows to re-authenticate.
    pub async fn refresh(
        &self,
        presented_token: &str,
        device: &str,
    ) -> Result<AuthenticatedAccount, DomainError> {
        // Step 1: signature check, and extract the account
        let claims = self.token_service.verify_refresh_token(presented_token)?;
        let account_id = claims
            .account_id()
            .map_err(|_| TokenError::InvalidRefreshToken)?;

        // Step 2: the stored row must match both account and hash
        let hash = self.token_service.hash_token(presented_token);
        let row = self
            .tokens
            .find(account_id, &hash)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        // Step 3: lazy expiry cleanup
        if row.is_expired() {
            self.tokens.delete(&row.token_hash).await?;
            return Err(TokenError::RefreshTokenExpired.into());
        }

        // Step 4: re-load the account and re-apply the status gate
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;
        self.check_status(&account)?;

        // Step 5: rotate
        let tokens = self
            .token_service
            .open_session(self.tokens.as_ref(), &account, device)
            .await?;

        Ok(AuthenticatedAccount::new(
            PartialAccount::from(&account),
            tokens,
        ))
    }

    /// Delete every refresh token for the account. Idempotent.
    pub async fn logout(&self, account_id: Uuid) -> Result<usize, DomainError> {
        let deleted = self.tokens.delete_all_for_account(account_id).await?;
        info!(%account_id, deleted, "logout");
        Ok(deleted)
    }

    fn check_status(&self, account: &Account) -> Result<(), DomainError> {
        match account.meta.status {
            AccountStatus::Active => Ok(()),
            AccountStatus::Banned => {
                warn!(account_id = %account.id, "suspended account attempted authentication");
                Err(AuthError::AccountSuspended.into())
            }
            // A closed account is indistinguishable from a missing one
            AccountStatus::Closed => Err(AuthError::InvalidCredentials.into()),
        }
    }
}
