//! Authentication DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use mc_core::domain::value_objects::AuthenticatedAccount;
use mc_core::domain::value_objects::PartialAccount;

/// Body for POST /auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address or username
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Body returned by login, refresh, and register.
///
/// The same tokens are also set as cookies; the body copy serves clients
/// that cannot use them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub account: PartialAccount,
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<AuthenticatedAccount> for AuthResponse {
    fn from(auth: AuthenticatedAccount) -> Self {
        Self {
            account: auth.account,
            access_token: auth.tokens.access_token,
            refresh_token: auth.tokens.refresh_token,
            expires_in: auth.tokens.access_expires_in,
        }
    }
}
