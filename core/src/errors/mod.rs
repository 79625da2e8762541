//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{
    extract_english_message, extract_spanish_message, AccountError, AuthError, TokenError,
    ValidationError,
};

use thiserror::Error;

/// Top-level domain error bridging the specific error families
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Numeric code carried in the response envelope.
    ///
    /// Mirrors HTTP status semantics so the gateway can map it directly.
    pub fn code(&self) -> u16 {
        match self {
            DomainError::Account(err) => match err {
                AccountError::EmailTaken
                | AccountError::UsernameTaken
                | AccountError::PublicNameTaken
                | AccountError::ProfileRoleMismatch
                | AccountError::EmptyUpdate => 400,
                AccountError::AdminRequired => 401,
                AccountError::AccountNotFound
                | AccountError::AddressNotFound
                | AccountError::StoreNotFound => 404,
                AccountError::ProfileDesync => 409,
            },
            DomainError::Auth(err) => match err {
                AuthError::InvalidCredentials => 400,
                AuthError::AccountSuspended => 403,
                AuthError::PasswordHashFailure => 500,
            },
            DomainError::Token(err) => match err {
                TokenError::TokenExpired
                | TokenError::RefreshTokenExpired
                | TokenError::InvalidRefreshToken => 400,
                TokenError::InvalidToken | TokenError::InvalidServiceToken => 401,
                TokenError::TokenGenerationFailed => 500,
            },
            DomainError::Validation(_) => 400,
            DomainError::Internal { .. } => 500,
        }
    }

    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Account(err) => err.error_code(),
            DomainError::Auth(err) => err.error_code(),
            DomainError::Token(err) => err.error_code(),
            DomainError::Validation(err) => err.error_code(),
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Whether the error should be masked from clients
    pub fn is_internal(&self) -> bool {
        self.code() == 500
    }
}
