//! # Mercadito Shared
//!
//! Cross-cutting types and utilities shared by every layer of the Mercadito
//! backend: configuration, the uniform service response envelope, pagination,
//! and input validation helpers.

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use types::pagination::Pagination;
pub use types::response::ServiceResponse;
