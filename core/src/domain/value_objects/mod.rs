//! Value objects representing immutable domain concepts.

pub mod actor;
pub mod auth_response;
pub mod patch;
pub mod registration;
pub mod views;

// Re-export commonly used types
pub use actor::Actor;
pub use auth_response::AuthenticatedAccount;
pub use patch::{AccountPatch, Patch, ProfilePatch};
pub use registration::{NewAccount, NewAddress, NewProfile, NewStore};
pub use views::{AccountInfo, PartialAccount};
