//! Partial-update payloads for accounts and profiles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::account::RoleGroup;
use crate::domain::entities::profile::Profile;

/// Three-state field update: leave alone, clear to null, or set.
///
/// Plain `Option` cannot distinguish "not sent" from "set to null", which
/// matters for nullable columns like the birth date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// Whether this patch changes anything
    pub fn is_change(&self) -> bool {
        !matches!(self, Patch::Keep)
    }

    /// Apply to an optional field, returning the new value
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }
}

/// Account-level fields that can be updated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccountPatch {
    pub email: Option<String>,
    pub username: Option<String>,
    /// Plaintext; re-hashed by the service before storage
    pub password: Option<String>,
}

impl AccountPatch {
    /// Whether any account field is being updated
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.password.is_none()
    }
}

/// Profile-level patch, tagged by role group so the service can reject a
/// patch aimed at a profile table the account does not have
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfilePatch {
    User {
        #[serde(default)]
        firstname: Option<String>,
        #[serde(default)]
        lastname: Option<String>,
        #[serde(default)]
        birth: Patch<NaiveDate>,
        #[serde(default)]
        phone: Option<String>,
    },
    Business {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        bio: Option<String>,
        #[serde(default)]
        phone: Option<String>,
        #[serde(default)]
        contact_email: Option<String>,
    },
    Admin {
        #[serde(default)]
        public_name: Option<String>,
    },
}

impl ProfilePatch {
    /// The role group this patch targets
    pub fn group(&self) -> RoleGroup {
        match self {
            ProfilePatch::User { .. } => RoleGroup::User,
            ProfilePatch::Business { .. } => RoleGroup::Business,
            ProfilePatch::Admin { .. } => RoleGroup::Admin,
        }
    }

    /// Apply the patch in place.
    ///
    /// Returns `false` without touching the profile when the variants do
    /// not line up; callers have already rejected that case.
    pub fn apply(self, profile: &mut Profile) -> bool {
        match (self, profile) {
            (
                ProfilePatch::User {
                    firstname,
                    lastname,
                    birth,
                    phone,
                },
                Profile::User(p),
            ) => {
                if let Some(firstname) = firstname {
                    p.firstname = firstname;
                }
                if let Some(lastname) = lastname {
                    p.lastname = lastname;
                }
                p.birth = birth.apply(p.birth);
                if let Some(phone) = phone {
                    p.phone = Some(phone);
                }
                true
            }
            (
                ProfilePatch::Business {
                    title,
                    bio,
                    phone,
                    contact_email,
                },
                Profile::Business(p),
            ) => {
                if let Some(title) = title {
                    p.title = title;
                }
                if let Some(bio) = bio {
                    p.bio = Some(bio);
                }
                if let Some(phone) = phone {
                    p.phone = phone;
                }
                if let Some(contact_email) = contact_email {
                    p.contact_email = contact_email;
                }
                true
            }
            (ProfilePatch::Admin { public_name }, Profile::Admin(p)) => {
                if let Some(public_name) = public_name {
                    p.public_name = public_name;
                }
                true
            }
            _ => false,
        }
    }

    /// Whether any profile field is being updated
    pub fn is_empty(&self) -> bool {
        match self {
            ProfilePatch::User {
                firstname,
                lastname,
                birth,
                phone,
            } => {
                firstname.is_none()
                    && lastname.is_none()
                    && !birth.is_change()
                    && phone.is_none()
            }
            ProfilePatch::Business {
                title,
                bio,
                phone,
                contact_email,
            } => {
                title.is_none() && bio.is_none() && phone.is_none() && contact_email.is_none()
            }
            ProfilePatch::Admin { public_name } => public_name.is_none(),
        }
    }
}
