//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Access and refresh token signing and verification
//! - Service-to-service token signing and verification
//! - Hashing of refresh tokens for storage at rest
//! - Session bookkeeping (one live refresh token per account)

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
