//! Account service module
//!
//! Registration, profile management, addresses and stores, account closure,
//! and the admin-gated moderation queries.

mod service;


pub use service::AccountService;
