//! Core type definitions for taxonomy-scoped autocomplete.
//!
//! This crate defines the plain data model shared by every other crate in
//! the workspace:
//! - Entity and term identifiers
//! - The context identifiers and constraint payload bound by a constraint token
//! - Field descriptors as reported by the field-metadata provider
//! - Content entities with their translations and taxonomy references
//! - Match queries, grouped match results and formatted suggestions
//!
//! Nothing here performs I/O. Storage, hashing and matching live in their
//! own crates and only exchange these values.

mod constraint;
mod entity;
mod field;
mod ids;
mod query;
mod result;
mod subqueue;

pub use constraint::{ConstraintPayload, ContextIds};
pub use entity::Entity;
pub use field::{FieldDescriptor, FieldType, HandlerSettings, TAXONOMY_TERM_HANDLER};
pub use ids::{EntityId, TermId};
pub use query::{MatchOperator, MatchQuery};
pub use result::{MatchResult, Suggestion};
pub use subqueue::SubqueueName;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("unknown match operator: {0}")]
    UnknownOperator(String),

    #[error("invalid subqueue name: {0}")]
    InvalidSubqueueName(String),
}
