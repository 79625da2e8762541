//! Mercadito HTTP gateway.
//!
//! Thin actix-web layer over the core services: request DTOs, cookie
//! handling, JWT middleware, and error-to-HTTP translation. All business
//! rules live in `mc_core`; this crate only moves bytes in and out.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
