//! Password hashing helpers wrapping bcrypt.

use crate::errors::{AuthError, DomainError};

/// Hash a plaintext password with the configured cost factor
pub fn hash_password(plain: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(plain, cost).map_err(|_| AuthError::PasswordHashFailure.into())
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a mismatch rather than an error, so
/// corrupt rows cannot be distinguished from wrong passwords by callers.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 keeps the tests fast; production uses the configured cost.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secreta1!", TEST_COST).unwrap();

        assert_ne!(hash, "Secreta1!");
        assert!(verify_password("Secreta1!", &hash));
        assert!(!verify_password("otra", &hash));
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        assert!(!verify_password("Secreta1!", "not-a-bcrypt-hash"));
    }
}
