//! Storage boundary for taxonomy-scoped autocomplete.
//!
//! The autocomplete core never owns persistence. It talks to four
//! collaborators, each behind a trait defined here:
//!
//! - [`ConstraintStore`]: key/value store holding constraint payloads by token
//! - [`FieldMetadataProvider`]: per-bundle field definitions
//! - [`EntityQueryExecutor`]: runs an [`EntityQuery`] and returns entity IDs
//! - [`EntityLoader`]: loads full entities for a set of IDs
//!
//! # Architecture
//!
//! - [`EntityQuery`] is a small condition tree (AND/OR groups of bundle,
//!   label and field-equality conditions) that executors translate to their
//!   own query language.
//! - [`MemoryConstraintStore`] and [`MemoryEntityStore`] are reference
//!   implementations used by tests and the demo server; they can be seeded
//!   from a JSON [`Fixtures`] file.

mod error;
mod fixtures;
mod memory;
mod query;
mod traits;

pub use error::{StorageError, StorageResult};
pub use fixtures::{BundleFields, Fixtures};
pub use memory::{MemoryConstraintStore, MemoryEntityStore};
pub use query::{Condition, ConditionGroup, Conjunction, EntityQuery};
pub use traits::{ConstraintStore, EntityLoader, EntityQueryExecutor, FieldMetadataProvider};
