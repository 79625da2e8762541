//! # Infrastructure Layer
//!
//! MySQL implementations of the core repository traits, plus connection
//! pool management and the binary UUID transform used by every table.

pub mod database;

pub use database::connection::DatabasePool;
pub use database::mysql::{MySqlAccountRepository, MySqlStoreRepository, MySqlTokenRepository};
