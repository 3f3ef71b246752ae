//! Error types for matching and the autocomplete pipeline.

use taxocomplete_crypto::AuthError;
use taxocomplete_storage::StorageError;
use thiserror::Error;

/// Result type for matcher operations.
pub type MatcherResult<T> = Result<T, MatchError>;

/// Failures of field discovery or entity matching.
#[derive(Debug, Error)]
pub enum MatchError {
    /// The field-metadata provider could not answer.
    #[error("field metadata unavailable: {0}")]
    MetadataUnavailable(#[source] StorageError),

    /// Query execution or entity loading failed.
    #[error("storage failure: {0}")]
    StorageFailure(#[source] StorageError),
}

/// Failures of one autocomplete request.
#[derive(Debug, Error)]
pub enum AutocompleteError {
    /// Missing, unknown or mismatched constraint token.
    #[error("unauthorized")]
    Unauthorized,

    /// No selection handler with this ID serves the target entity type.
    #[error("no selection handler {handler:?} for entity type {target_type:?}")]
    UnknownHandler { handler: String, target_type: String },

    /// Authentication could not be performed (store or salt failure).
    #[error("authentication failed: {0}")]
    Authentication(#[source] AuthError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

impl From<AuthError> for AutocompleteError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => Self::Unauthorized,
            other => Self::Authentication(other),
        }
    }
}
