//! Response construction helpers shared by the route handlers.

pub mod cookies;
pub mod error;
