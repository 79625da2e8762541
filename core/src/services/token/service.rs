//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::domain::entities::token::{
    Claims, RefreshToken, ServiceClaims, TokenPair, JWT_AUDIENCE, JWT_ISSUER, SERVICE_AUDIENCE,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Service for signing and verifying JWTs and hashing refresh tokens.
///
/// Holds one key pair per token class. Persistence is left to callers
/// except for `open_session`, which owns the one-live-token invariant.
pub struct TokenService {
    config: TokenServiceConfig,
    access_keys: KeyPair,
    refresh_keys: KeyPair,
    service_keys: KeyPair,
    client_validation: Validation,
    service_validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let mut client_validation = Validation::new(Algorithm::HS256);
        client_validation.set_issuer(&[JWT_ISSUER]);
        client_validation.set_audience(&[JWT_AUDIENCE]);
        client_validation.validate_exp = true;
        client_validation.validate_nbf = true;

        let mut service_validation = Validation::new(Algorithm::HS256);
        service_validation.set_issuer(&[JWT_ISSUER]);
        service_validation.set_audience(&[SERVICE_AUDIENCE]);
        service_validation.validate_exp = true;

        Self {
            access_keys: KeyPair::from_secret(&config.access_secret),
            refresh_keys: KeyPair::from_secret(&config.refresh_secret),
            service_keys: KeyPair::from_secret(&config.service_secret),
            config,
            client_validation,
            service_validation,
        }
    }

    /// Signs a fresh access/refresh token pair for an account
    pub fn issue_pair(&self, account_id: Uuid, role: Role) -> Result<TokenPair, DomainError> {
        let access_claims =
            Claims::new_access_token(account_id, role, self.config.access_ttl_secs);
        let refresh_claims = Claims::new_refresh_token(account_id, self.config.refresh_ttl_secs);

        let access_token = self.encode(&access_claims, &self.access_keys)?;
        let refresh_token = self.encode(&refresh_claims, &self.refresh_keys)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_ttl_secs,
            self.config.refresh_ttl_secs,
        ))
    }

    /// Issues a token pair and persists the refresh half, replacing any
    /// prior session.
    ///
    /// At most one live refresh token per account: all existing rows are
    /// deleted before the new one is saved.
    pub async fn open_session<R: TokenRepository>(
        &self,
        repository: &R,
        account: &Account,
        device: &str,
    ) -> Result<TokenPair, DomainError> {
        let pair = self.issue_pair(account.id, account.meta.role)?;

        repository.delete_all_for_account(account.id).await?;
        let row = RefreshToken::new(
            account.id,
            self.hash_token(&pair.refresh_token),
            device.to_string(),
            self.config.refresh_ttl_secs,
        );
        repository.save(row).await?;

        Ok(pair)
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.access_keys.decoding, &self.client_validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::TokenExpired)
                }
                _ => DomainError::Token(TokenError::InvalidToken),
            })?;
        Ok(data.claims)
    }

    /// Verifies a refresh token signature and returns its claims.
    ///
    /// Signature validity alone does not authorize a refresh; the stored
    /// row must also match.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.refresh_keys.decoding, &self.client_validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    DomainError::Token(TokenError::RefreshTokenExpired)
                }
                _ => DomainError::Token(TokenError::InvalidRefreshToken),
            })?;
        Ok(data.claims)
    }

    /// Signs a short-lived service-to-service token
    pub fn issue_service_token(&self, service_name: &str) -> Result<String, DomainError> {
        let claims = ServiceClaims::new(service_name, self.config.service_ttl_secs);
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.service_keys.encoding)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a service token and returns its claims
    pub fn verify_service_token(&self, token: &str) -> Result<ServiceClaims, DomainError> {
        let data =
            decode::<ServiceClaims>(token, &self.service_keys.decoding, &self.service_validation)
                .map_err(|_| DomainError::Token(TokenError::InvalidServiceToken))?;
        Ok(data.claims)
    }

    /// SHA-256 hex digest of a token, the only form stored at rest
    pub fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn encode(&self, claims: &Claims, keys: &KeyPair) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &keys.encoding)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
