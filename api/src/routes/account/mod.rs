//! Account endpoints: registration, self-service management, and the
//! admin/moderation surface.

pub mod address;
pub mod admin;
pub mod close;
pub mod info;
pub mod register;
pub mod store;
pub mod update;
