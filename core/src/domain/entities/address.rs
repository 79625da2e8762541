//! Address entity, owned by either an account or a store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single owner of an address.
///
/// An address row belongs to exactly one account or exactly one store,
/// never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum AddressOwner {
    Account(Uuid),
    Store(Uuid),
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Uuid,
    pub owner: AddressOwner,
    pub street: String,
    pub apartment: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
}

impl Address {
    /// Creates a new address with a fresh id
    pub fn new(
        owner: AddressOwner,
        street: String,
        apartment: Option<String>,
        city: String,
        zip: String,
        country: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            street,
            apartment,
            city,
            zip,
            country,
        }
    }

    /// Whether the address is owned by the given account
    pub fn belongs_to_account(&self, account_id: Uuid) -> bool {
        matches!(self.owner, AddressOwner::Account(id) if id == account_id)
    }
}
