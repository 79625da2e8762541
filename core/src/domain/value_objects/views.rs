//! Read-only projections of account data for callers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, AccountStatus, Role};
use crate::domain::entities::address::Address;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::store::Store;

/// Slim public view of an account, safe to return to any caller.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialAccount {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl From<&Account> for PartialAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            username: account.username.clone(),
            role: account.meta.role,
            status: account.meta.status,
        }
    }
}

/// Full account aggregate: account, profile, and owned records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account: PartialAccount,
    pub profile: Profile,
    pub addresses: Vec<Address>,
    pub stores: Vec<Store>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_account_drops_credentials() {
        let account = Account::new(
            "a@x.com".to_string(),
            "ana".to_string(),
            "$2b$12$hash".to_string(),
            Role::User,
        );

        let view = PartialAccount::from(&account);
        assert_eq!(view.id, account.id);
        assert_eq!(view.role, Role::User);
        assert_eq!(view.status, AccountStatus::Active);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("hash"));
    }
}
