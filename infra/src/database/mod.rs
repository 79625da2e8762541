//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository implementations
//! - The binary⇄text UUID transform used at every table boundary

pub mod connection;
pub mod mysql;
pub mod uuid_bin;

pub use connection::DatabasePool;
pub use mysql::{MySqlAccountRepository, MySqlStoreRepository, MySqlTokenRepository};
