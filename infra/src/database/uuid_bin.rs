//! Binary⇄text UUID transform.
//!
//! Account, address, and store identifiers are UUIDv4s stored in
//! `BINARY(16)` columns. Every query binds and reads through these two
//! helpers so the representation never leaks past this module.

use uuid::Uuid;

use mc_core::errors::DomainError;

/// UUID to its 16-byte column representation
pub fn uuid_to_bin(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

/// 16-byte column value back to a UUID
pub fn bin_to_uuid(bytes: &[u8]) -> Result<Uuid, DomainError> {
    Uuid::from_slice(bytes).map_err(|e| DomainError::Internal {
        message: format!("invalid binary uuid column: {e}"),
    })
}
