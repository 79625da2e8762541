//! Common type definitions shared across the workspace.

pub mod pagination;
pub mod response;

pub use pagination::Pagination;
pub use response::ServiceResponse;
