//! MySQL repository implementations.

mod account_repository_impl;
mod store_repository_impl;
mod token_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use store_repository_impl::MySqlStoreRepository;
pub use token_repository_impl::MySqlTokenRepository;

use mc_core::errors::DomainError;

/// Wrap a low-level database error, tagging it with where it happened.
/// Internal errors are masked before they reach a client.
pub(crate) fn internal<E: std::fmt::Display>(
    context: &'static str,
) -> impl Fn(E) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("{context}: {e}"),
    }
}
