//! Route handlers, grouped by resource.

pub mod account;
pub mod auth;

use std::sync::Arc;

use actix_web::http::header;
use actix_web::HttpRequest;

use mc_core::repositories::{AccountRepository, StoreRepository, TokenRepository};
use mc_core::services::{AccountService, AuthService, TokenService};
use mc_shared::config::CookieConfig;

/// Shared services handed to every handler
pub struct AppState<A, T, S>
where
    A: AccountRepository,
    T: TokenRepository,
    S: StoreRepository,
{
    pub account_service: Arc<AccountService<A, T, S>>,
    pub auth_service: Arc<AuthService<A, T>>,
    pub token_service: Arc<TokenService>,
    pub cookies: CookieConfig,
}

/// Device label recorded with refresh tokens, taken from the user agent
pub fn device_label(req: &HttpRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .chars()
        .take(120)
        .collect()
}
