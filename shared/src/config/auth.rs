//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// Signing secrets and token lifetimes
///
/// Access, refresh and service tokens are signed with distinct secrets so
/// that one class of token can never be replayed as another.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecretsConfig {
    /// Secret used to sign access tokens
    pub access_secret: String,

    /// Secret used to sign refresh tokens
    pub refresh_secret: String,

    /// Secret used to sign inter-service tokens
    pub service_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Service token lifetime in seconds
    pub service_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("dev-access-secret-change-in-production"),
            refresh_secret: String::from("dev-refresh-secret-change-in-production"),
            service_secret: String::from("dev-service-secret-change-in-production"),
            access_token_expiry: 3600,      // 1 hour
            refresh_token_expiry: 86400,    // 24 hours
            service_token_expiry: 300,      // 5 minutes
            issuer: String::from("mercadito"),
        }
    }
}

impl SecretsConfig {
    /// Whether any of the development placeholder secrets are still in use
    pub fn is_using_default_secrets(&self) -> bool {
        self.access_secret.starts_with("dev-")
            || self.refresh_secret.starts_with("dev-")
            || self.service_secret.starts_with("dev-")
    }
}

/// Cookie attributes for the token cookies set by the gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Access-token cookie name
    pub access_cookie_name: String,

    /// Refresh-token cookie name
    pub refresh_cookie_name: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// Cookies are always HttpOnly
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: String::from("accessToken"),
            refresh_cookie_name: String::from("refreshToken"),
            secure: false, // set true in production
            http_only: default_http_only(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Token secrets and lifetimes
    pub secrets: SecretsConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Bcrypt cost factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secrets: SecretsConfig::default(),
            cookies: CookieConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// Reads `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET`, `JWT_SERVICE_SECRET`,
    /// the expiry overrides and `BCRYPT_COST`, falling back to development
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = SecretsConfig::default();
        let secrets = SecretsConfig {
            access_secret: std::env::var("JWT_ACCESS_SECRET")
                .unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET")
                .unwrap_or(defaults.refresh_secret),
            service_secret: std::env::var("JWT_SERVICE_SECRET")
                .unwrap_or(defaults.service_secret),
            access_token_expiry: env_i64("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: env_i64("JWT_REFRESH_TOKEN_EXPIRY", defaults.refresh_token_expiry),
            service_token_expiry: env_i64("JWT_SERVICE_TOKEN_EXPIRY", defaults.service_token_expiry),
            issuer: defaults.issuer,
        };

        let cookies = CookieConfig {
            secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            ..CookieConfig::default()
        };

        Self {
            secrets,
            cookies,
            bcrypt_cost: std::env::var("BCRYPT_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_bcrypt_cost),
        }
    }
}

fn env_i64(key: &str, fallback: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_http_only() -> bool {
    true
}
