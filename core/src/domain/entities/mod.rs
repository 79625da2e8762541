//! Domain entities representing core business objects.

pub mod account;
pub mod address;
pub mod profile;
pub mod store;
pub mod token;

// Re-export commonly used types
pub use account::{Account, AccountMeta, AccountStatus, Role, RoleGroup};
pub use address::{Address, AddressOwner};
pub use profile::{AdminProfile, BusinessProfile, Profile, UserProfile};
pub use store::Store;
pub use token::{
    Claims, RefreshToken, ServiceClaims, TokenPair, ACCESS_TOKEN_EXPIRY_SECS,
    JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_SECS, SERVICE_AUDIENCE,
};
