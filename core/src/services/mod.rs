//! Business services orchestrating domain operations.

pub mod account;
pub mod auth;
pub mod token;

pub use account::AccountService;
pub use auth::AuthService;
pub use token::{TokenService, TokenServiceConfig};
