//! Token service configuration.

use mc_shared::config::auth::SecretsConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_SECS, REFRESH_TOKEN_EXPIRY_SECS, SERVICE_TOKEN_EXPIRY_SECS,
};

/// Configuration for the token service.
///
/// Three independent secrets; a token signed for one purpose can never
/// verify against another purpose's key.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Secret for signing service-to-service tokens
    pub service_secret: String,

    /// Access token lifetime in seconds
    pub access_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_ttl_secs: i64,

    /// Service token lifetime in seconds
    pub service_ttl_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "dev-access-secret-change-me".to_string(),
            refresh_secret: "dev-refresh-secret-change-me".to_string(),
            service_secret: "dev-service-secret-change-me".to_string(),
            access_ttl_secs: ACCESS_TOKEN_EXPIRY_SECS,
            refresh_ttl_secs: REFRESH_TOKEN_EXPIRY_SECS,
            service_ttl_secs: SERVICE_TOKEN_EXPIRY_SECS,
        }
    }
}

impl From<&SecretsConfig> for TokenServiceConfig {
    fn from(secrets: &SecretsConfig) -> Self {
        Self {
            access_secret: secrets.access_secret.clone(),
            refresh_secret: secrets.refresh_secret.clone(),
            service_secret: secrets.service_secret.clone(),
            access_ttl_secs: secrets.access_token_expiry,
            refresh_ttl_secs: secrets.refresh_token_expiry,
            service_ttl_secs: secrets.service_token_expiry,
        }
    }
}
