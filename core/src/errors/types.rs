//! Domain-specific error types for account and authentication operations
//!
//! This module provides error types with bilingual support (English and Spanish)
//! for account management, authentication, token handling, and validation.

use thiserror::Error;

/// Account management errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Email already in use | El email ya está en uso")]
    EmailTaken,

    #[error("Username already in use | El nombre de usuario ya está en uso")]
    UsernameTaken,

    #[error("Public name already in use | El nombre público ya está en uso")]
    PublicNameTaken,

    #[error("Profile does not match the account role | El perfil no corresponde al rol de la cuenta")]
    ProfileRoleMismatch,

    #[error("Account not found | Cuenta no encontrada")]
    AccountNotFound,

    #[error("Address not found | Dirección no encontrada")]
    AddressNotFound,

    #[error("Store not found | Tienda no encontrada")]
    StoreNotFound,

    #[error("Nothing to update | No hay cambios para aplicar")]
    EmptyUpdate,

    #[error("Serious account error, contact support | Error grave en su cuenta, contacte a soporte")]
    ProfileDesync,

    #[error("Admin privileges required | Se requieren privilegios de administrador")]
    AdminRequired,
}

/// Authentication errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials | Credenciales inválidas")]
    InvalidCredentials,

    #[error("Account suspended | Cuenta suspendida")]
    AccountSuspended,

    #[error("Password hashing failed | Error al procesar la contraseña")]
    PasswordHashFailure,
}

/// Token errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired | El token ha expirado")]
    TokenExpired,

    #[error("Invalid token | Token inválido")]
    InvalidToken,

    #[error("Refresh token expired | El token de actualización ha expirado")]
    RefreshTokenExpired,

    #[error("Invalid refresh token | Token de actualización inválido")]
    InvalidRefreshToken,

    #[error("Invalid service token | Token de servicio inválido")]
    InvalidServiceToken,

    #[error("Token generation failed | Error al generar el token")]
    TokenGenerationFailed,
}

/// Validation errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field} | Campo obligatorio: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format | Formato de email inválido")]
    InvalidEmail,

    #[error("Invalid username format | Formato de nombre de usuario inválido")]
    InvalidUsername,

    #[error("Password too weak: {reason} | Contraseña demasiado débil: {reason}")]
    WeakPassword { reason: String },

    #[error("Invalid format for field: {field} | Formato inválido para el campo: {field}")]
    InvalidFormat { field: String },
}

impl AccountError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AccountError::EmailTaken => "EMAIL_TAKEN",
            AccountError::UsernameTaken => "USERNAME_TAKEN",
            AccountError::PublicNameTaken => "PUBLIC_NAME_TAKEN",
            AccountError::ProfileRoleMismatch => "PROFILE_ROLE_MISMATCH",
            AccountError::AccountNotFound => "ACCOUNT_NOT_FOUND",
            AccountError::AddressNotFound => "ADDRESS_NOT_FOUND",
            AccountError::StoreNotFound => "STORE_NOT_FOUND",
            AccountError::EmptyUpdate => "EMPTY_UPDATE",
            AccountError::ProfileDesync => "PROFILE_DESYNC",
            AccountError::AdminRequired => "ADMIN_REQUIRED",
        }
    }
}

impl AuthError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountSuspended => "ACCOUNT_SUSPENDED",
            AuthError::PasswordHashFailure => "PASSWORD_HASH_FAILURE",
        }
    }
}

impl TokenError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidToken => "INVALID_TOKEN",
            TokenError::RefreshTokenExpired => "REFRESH_TOKEN_EXPIRED",
            TokenError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            TokenError::InvalidServiceToken => "INVALID_SERVICE_TOKEN",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}

impl ValidationError {
    /// Stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidUsername => "INVALID_USERNAME",
            ValidationError::WeakPassword { .. } => "WEAK_PASSWORD",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
        }
    }
}

/// Helper function to extract the English half of a bilingual message
pub fn extract_english_message(message: &str) -> &str {
    message.split(" | ").next().unwrap_or(message)
}

/// Helper function to extract the Spanish half of a bilingual message
pub fn extract_spanish_message(message: &str) -> &str {
    message.split(" | ").nth(1).unwrap_or(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_error_messages() {
        let message = AccountError::EmailTaken.to_string();
        assert!(message.contains("Email already in use"));
        assert!(message.contains("El email ya está en uso"));
    }

    #[test]
    fn test_auth_error_messages() {
        let message = AuthError::InvalidCredentials.to_string();
        assert!(message.contains("Invalid credentials"));
        assert!(message.contains("Credenciales inválidas"));
    }

    #[test]
    fn test_validation_error_with_field() {
        let error = ValidationError::RequiredField {
            field: "email".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("email"));
        assert!(message.contains("Campo obligatorio"));
    }

    #[test]
    fn test_message_extraction() {
        let bilingual = "Invalid token | Token inválido";
        assert_eq!(extract_english_message(bilingual), "Invalid token");
        assert_eq!(extract_spanish_message(bilingual), "Token inválido");

        let english_only = "Only English";
        assert_eq!(extract_english_message(english_only), "Only English");
        assert_eq!(extract_spanish_message(english_only), "Only English");
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AccountError::ProfileDesync.error_code(), "PROFILE_DESYNC");
        assert_eq!(TokenError::RefreshTokenExpired.error_code(), "REFRESH_TOKEN_EXPIRED");
    }
}
