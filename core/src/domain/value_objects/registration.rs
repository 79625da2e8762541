//! Inputs for account registration.

use serde::{Deserialize, Serialize};

use crate::domain::entities::account::{Role, RoleGroup};
use crate::domain::entities::profile::{
    AdminProfile, BusinessProfile, Profile, UserProfile,
};

/// Profile payload for a new account, tagged to match the chosen role.
///
/// The variant must agree with `NewAccount::role`'s group; the service
/// rejects a mismatch before touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NewProfile {
    User {
        firstname: String,
        lastname: String,
        birth: Option<chrono::NaiveDate>,
        phone: Option<String>,
    },
    Business {
        title: String,
        bio: Option<String>,
        phone: String,
        /// Defaults to the account email when absent
        contact_email: Option<String>,
    },
    Admin {
        public_name: String,
    },
}

impl NewProfile {
    /// The role group this payload targets
    pub fn group(&self) -> RoleGroup {
        match self {
            NewProfile::User { .. } => RoleGroup::User,
            NewProfile::Business { .. } => RoleGroup::Business,
            NewProfile::Admin { .. } => RoleGroup::Admin,
        }
    }

    /// Materialize the profile entity, filling defaults from the account
    pub fn into_profile(self, account_email: &str) -> Profile {
        match self {
            NewProfile::User {
                firstname,
                lastname,
                birth,
                phone,
            } => Profile::User(UserProfile {
                firstname,
                lastname,
                birth,
                phone,
            }),
            NewProfile::Business {
                title,
                bio,
                phone,
                contact_email,
            } => Profile::Business(BusinessProfile {
                title,
                bio,
                phone,
                contact_email: contact_email.unwrap_or_else(|| account_email.to_string()),
            }),
            NewProfile::Admin { public_name } => Profile::Admin(AdminProfile { public_name }),
        }
    }
}

/// Input for a new address row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub apartment: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
}

/// Input for a new store, created together with its address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStore {
    pub phone: String,
    pub address: NewAddress,
}

/// Complete registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    /// Plaintext password, hashed by the service before storage
    pub password: String,
    pub role: Role,
    pub profile: NewProfile,
    /// Device label for the refresh token minted at registration
    pub device: String,
}

impl NewAccount {
    /// Whether the profile payload agrees with the chosen role
    pub fn profile_matches_role(&self) -> bool {
        self.profile.group() == self.role.group()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_contact_email_defaults_to_account_email() {
        let profile = NewProfile::Business {
            title: "Panaderia Sol".to_string(),
            bio: None,
            phone: "+56911111111".to_string(),
            contact_email: None,
        };

        match profile.into_profile("duena@sol.cl") {
            Profile::Business(b) => assert_eq!(b.contact_email, "duena@sol.cl"),
            other => panic!("expected business profile, got {other:?}"),
        }
    }

    #[test]
    fn test_profile_role_agreement() {
        let request = NewAccount {
            email: "a@x.com".to_string(),
            username: "ana".to_string(),
            password: "Secreta1!".to_string(),
            role: Role::UserSeller,
            profile: NewProfile::User {
                firstname: "Ana".to_string(),
                lastname: "Soto".to_string(),
                birth: None,
                phone: None,
            },
            device: "web".to_string(),
        };
        assert!(request.profile_matches_role());

        let mismatched = NewAccount {
            role: Role::Admin,
            ..request
        };
        assert!(!mismatched.profile_matches_role());
    }
}
