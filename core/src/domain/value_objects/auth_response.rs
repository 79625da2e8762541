//! Authentication response value object returned by login and refresh.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::views::PartialAccount;

/// Successful authentication result: who logged in, plus the fresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedAccount {
    /// Public view of the authenticated account
    pub account: PartialAccount,

    /// Newly issued access/refresh token pair
    pub tokens: TokenPair,
}

impl AuthenticatedAccount {
    /// Creates a new authentication response
    pub fn new(account: PartialAccount, tokens: TokenPair) -> Self {
        Self { account, tokens }
    }
}
