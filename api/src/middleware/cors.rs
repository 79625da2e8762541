//! CORS configuration for browser clients.
//!
//! The storefront runs on a different origin than the gateway, and the
//! token cookies require credentialed requests, so allowed origins must be
//! listed explicitly in production. An empty origin list falls back to
//! allow-any without credentials, which is only useful for local tools.

use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::http::Method;

use mc_shared::config::CorsConfig;

use super::auth::SERVICE_TOKEN_HEADER;

/// Build the CORS middleware from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            HeaderName::from_static(SERVICE_TOKEN_HEADER),
        ])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() {
        // allow_any_origin cannot be combined with credentials
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        if config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}
