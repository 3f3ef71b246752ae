//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution failed.
    #[error("query failed: {0}")]
    Query(String),

    /// Loading entities failed.
    #[error("entity load failed: {0}")]
    Load(String),

    /// Field metadata could not be read.
    #[error("field metadata unavailable: {0}")]
    Metadata(String),

    /// Key/value store failure.
    #[error("key/value store error: {0}")]
    KeyValue(String),

    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Lock,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (fixture files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
