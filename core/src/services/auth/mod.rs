//! Authentication service module
//!
//! Credential login, refresh token rotation, and logout.

pub mod password;
mod service;


pub use service::AuthService;
