//! Profile variants, one per account matching its role group.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::account::RoleGroup;

/// Profile for regular (and seller) user accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub firstname: String,
    pub lastname: String,
    pub birth: Option<NaiveDate>,
    pub phone: Option<String>,
}

/// Profile for business accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Public-facing business name, unique across businesses
    pub title: String,
    pub bio: Option<String>,
    pub phone: String,
    pub contact_email: String,
}

/// Profile for admin accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Unique public handle shown in moderation trails
    pub public_name: String,
}

/// The one profile record an account owns, tagged by role group.
///
/// Dispatch over this enum is exhaustive, so a role can never reach a code
/// path that has no matching profile branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    User(UserProfile),
    Business(BusinessProfile),
    Admin(AdminProfile),
}

impl Profile {
    /// The role group this profile belongs to
    pub fn group(&self) -> RoleGroup {
        match self {
            Profile::User(_) => RoleGroup::User,
            Profile::Business(_) => RoleGroup::Business,
            Profile::Admin(_) => RoleGroup::Admin,
        }
    }

    /// Whether this profile matches the given role group
    pub fn matches(&self, group: RoleGroup) -> bool {
        self.group() == group
    }
}
