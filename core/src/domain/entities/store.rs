//! Store entity for seller and business accounts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::address::Address;

/// Physical store belonging to an account, with exactly one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub account_id: Uuid,
    pub phone: String,
    /// Set by moderation once the store has been verified
    pub verified: bool,
    pub address: Address,
}

impl Store {
    /// Creates a new unverified store
    pub fn new(account_id: Uuid, phone: String, address: Address) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            phone,
            verified: false,
            address,
        }
    }
}
