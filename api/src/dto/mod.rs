//! Request and response DTOs for the gateway.

pub mod account_dto;
pub mod auth_dto;
