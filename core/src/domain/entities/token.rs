//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::Role;

/// Default access token lifetime (1 hour)
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 3600;

/// Default refresh token lifetime (24 hours)
pub const REFRESH_TOKEN_EXPIRY_SECS: i64 = 86400;

/// Default service token lifetime (5 minutes)
pub const SERVICE_TOKEN_EXPIRY_SECS: i64 = 300;

/// JWT issuer
pub const JWT_ISSUER: &str = "mercadito";

/// JWT audience for client-facing tokens
pub const JWT_AUDIENCE: &str = "mercadito-api";

/// JWT audience for service-to-service tokens
pub const SERVICE_AUDIENCE: &str = "mercadito-internal";

/// Claims structure for access and refresh token payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,

    /// Account role, present on access tokens only
    pub role: Option<Role>,
}

impl Claims {
    /// Creates new claims for an access token
    pub fn new_access_token(account_id: Uuid, role: Role, ttl_secs: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_secs);

        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            role: Some(role),
        }
    }

    /// Creates new claims for a refresh token
    pub fn new_refresh_token(account_id: Uuid, ttl_secs: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_secs);

        Self {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            role: None,
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently valid (inside the nbf/exp window)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the account ID from the claims
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Claims for signed service-to-service tokens.
///
/// The subject is the calling service's name, not an account ID, and the
/// audience is the internal one so a service token can never pass for a
/// client access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceClaims {
    /// Subject (calling service name, e.g. "order")
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience, always the internal one
    pub aud: String,
}

impl ServiceClaims {
    /// Creates new claims for a service token
    pub fn new(service_name: &str, ttl_secs: i64) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::seconds(ttl_secs);

        Self {
            sub: service_name.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: SERVICE_AUDIENCE.to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Refresh token row as stored at rest.
///
/// Only the SHA-256 hash of the signed token is persisted; possession of the
/// table contents is not enough to replay a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Hash of the signed token value, primary key at rest
    pub token_hash: String,

    /// Account this token belongs to
    pub account_id: Uuid,

    /// Free-text device label for audit
    pub device: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new refresh token row
    pub fn new(account_id: Uuid, token_hash: String, device: String, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            token_hash,
            account_id,
            device,
            created_at: now,
            expires_at: now + Duration::seconds(ttl_secs),
        }
    }

    /// Checks if the refresh token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with the given lifetimes
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
