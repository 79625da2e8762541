//! Account management DTOs.
//!
//! Inbound shapes are validated with `validator` before they reach the
//! service layer, which re-checks the domain rules; the derive catches the
//! obviously malformed requests early with a field-level message.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use mc_core::domain::entities::account::Role;
use mc_core::domain::value_objects::{
    AccountPatch, NewAccount, NewProfile, ProfilePatch,
};

/// Body for POST /account (registration)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 3, max = 30))]
    pub username: String,

    #[validate(length(min = 8, max = 32))]
    pub password: String,

    pub role: Role,

    /// Tagged profile payload; must match the role's group
    pub profile: NewProfile,
}

impl RegisterRequest {
    /// Assemble the core registration input, attaching the device label
    pub fn into_new_account(self, device: String) -> NewAccount {
        NewAccount {
            email: self.email,
            username: self.username,
            password: self.password,
            role: self.role,
            profile: self.profile,
            device,
        }
    }
}

/// Body for PUT /account (partial update)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub profile: Option<ProfilePatch>,
}

impl UpdateAccountRequest {
    /// Split into the account-level patch and the optional profile patch
    pub fn into_patches(self) -> (AccountPatch, Option<ProfilePatch>) {
        (
            AccountPatch {
                email: self.email,
                username: self.username,
                password: self.password,
            },
            self.profile,
        )
    }
}

/// Body for POST /account/delete (password re-confirmation)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CloseAccountRequest {
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Query for GET /account/admin/list
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

/// Query for GET /account/admin/banned-list
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BannedListQuery {
    pub limit: Option<u32>,
}

/// Query for GET /account/admin/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub term: String,
}

/// Body for POST /account/admin/list-info (bulk partial views)
#[derive(Debug, Clone, Deserialize)]
pub struct ListInfoRequest {
    pub ids: Vec<Uuid>,
}
