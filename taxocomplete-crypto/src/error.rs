//! Error types for constraint authentication.

use taxocomplete_storage::StorageError;
use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while issuing or verifying constraint tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token missing, unknown, or not matching payload and context. The
    /// cause is deliberately not distinguished.
    #[error("unauthorized")]
    Unauthorized,

    /// The salt is too short to key the hash.
    #[error("hash salt too short: expected at least {expected} bytes, got {actual}")]
    SaltTooShort { expected: usize, actual: usize },

    /// The constraint store failed.
    #[error("constraint store error: {0}")]
    Store(#[from] StorageError),

    /// The payload could not be canonicalized.
    #[error("serialization error: {0}")]
    Serialization(#[from] taxocomplete_types::Error),
}
