//! Account entity and its role/status vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role assigned to an account at creation time.
///
/// `UserSeller` is an extended variant of `User`: it shares the user profile
/// table and differs only in marketplace permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(rename = "user-seller")]
    UserSeller,
    Business,
    Admin,
}

impl Role {
    /// The persisted slug for this role
    pub fn slug(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::UserSeller => "user-seller",
            Role::Business => "business",
            Role::Admin => "admin",
        }
    }

    /// Resolve a role from its persisted slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "user" => Some(Role::User),
            "user-seller" => Some(Role::UserSeller),
            "business" => Some(Role::Business),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// The profile group this role maps to
    pub fn group(&self) -> RoleGroup {
        match self {
            Role::User | Role::UserSeller => RoleGroup::User,
            Role::Business => RoleGroup::Business,
            Role::Admin => RoleGroup::Admin,
        }
    }

    /// Whether this role carries administrative privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Profile group determining which profile table an account joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleGroup {
    User,
    Business,
    Admin,
}

/// Lifecycle status of an account.
///
/// `Banned` is an admin-reversible suspension; `Closed` is the user-requested
/// account closure. Both preserve the account row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Banned,
    Closed,
}

impl AccountStatus {
    /// The persisted slug for this status
    pub fn slug(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Banned => "banned",
            AccountStatus::Closed => "closed",
        }
    }

    /// Resolve a status from its persisted slug
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "active" => Some(AccountStatus::Active),
            "banned" => Some(AccountStatus::Banned),
            "closed" => Some(AccountStatus::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Bookkeeping record owned 1:1 by every account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    /// Role assigned at registration
    pub role: Role,

    /// Current lifecycle status
    pub status: AccountStatus,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the status last changed (ban, unban, closure)
    pub status_changed_at: Option<DateTime<Utc>>,

    /// Who performed the last status change
    pub status_changed_by: Option<Uuid>,
}

impl AccountMeta {
    /// Fresh metadata for a newly registered account
    pub fn new(role: Role) -> Self {
        let now = Utc::now();
        Self {
            role,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
            status_changed_at: None,
            status_changed_by: None,
        }
    }
}

/// Account entity with credentials and metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Unique email address
    pub email: String,

    /// Unique username
    pub username: String,

    /// Bcrypt hash of the password; plaintext is never stored
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Bookkeeping metadata (role, status, timestamps)
    pub meta: AccountMeta,
}

impl Account {
    /// Creates a new active account
    pub fn new(email: String, username: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            password_hash,
            meta: AccountMeta::new(role),
        }
    }

    /// Whether the account is currently suspended
    pub fn is_banned(&self) -> bool {
        self.meta.status == AccountStatus::Banned
    }

    /// Whether the account has been closed by its owner
    pub fn is_closed(&self) -> bool {
        self.meta.status == AccountStatus::Closed
    }

    /// Whether the account can authenticate
    pub fn is_active(&self) -> bool {
        self.meta.status == AccountStatus::Active
    }

    /// Suspend the account, recording who did it
    pub fn ban(&mut self, actor: Uuid) {
        self.transition(AccountStatus::Banned, Some(actor));
    }

    /// Lift a suspension, recording who did it
    pub fn unban(&mut self, actor: Uuid) {
        self.transition(AccountStatus::Active, Some(actor));
    }

    /// Close the account at the owner's request
    pub fn close(&mut self, actor: Uuid) {
        self.transition(AccountStatus::Closed, Some(actor));
    }

    /// Flip between Active and Banned, returning the new status.
    ///
    /// Closed accounts are left untouched; closure is not reversible through
    /// the ban toggle.
    pub fn toggle_banned(&mut self, actor: Uuid) -> AccountStatus {
        match self.meta.status {
            AccountStatus::Banned => self.unban(actor),
            AccountStatus::Active => self.ban(actor),
            AccountStatus::Closed => {}
        }
        self.meta.status
    }

    fn transition(&mut self, status: AccountStatus, actor: Option<Uuid>) {
        let now = Utc::now();
        self.meta.status = status;
        self.meta.status_changed_at = Some(now);
        self.meta.status_changed_by = actor;
        self.meta.updated_at = now;
    }
}
