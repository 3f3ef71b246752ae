use taxocomplete_types::{ConstraintPayload, Entity, EntityId, FieldDescriptor};

use crate::{EntityQuery, StorageResult};

/// Key/value store holding constraint payloads under their tokens.
pub trait ConstraintStore: Send + Sync {
    /// Returns the payload stored under `token`, or `None` if absent.
    fn get(&self, token: &str) -> StorageResult<Option<ConstraintPayload>>;

    /// Stores `payload` under `token`, replacing any previous value.
    fn set(&self, token: &str, payload: &ConstraintPayload) -> StorageResult<()>;
}

/// Reports the field definitions of a bundle.
pub trait FieldMetadataProvider: Send + Sync {
    /// Returns every field defined on `bundle` of `entity_type`. An unknown
    /// bundle has no fields.
    fn field_definitions(&self, entity_type: &str, bundle: &str) -> StorageResult<Vec<FieldDescriptor>>;
}

/// Executes entity queries.
pub trait EntityQueryExecutor: Send + Sync {
    /// Returns the IDs of matching entities, honoring the query's range.
    fn execute(&self, query: &EntityQuery) -> StorageResult<Vec<EntityId>>;
}

/// Loads full entities.
pub trait EntityLoader: Send + Sync {
    /// Loads the entities of `entity_type` with the given IDs, in the order
    /// of `ids`. Missing IDs are skipped.
    fn load_multiple(&self, entity_type: &str, ids: &[EntityId]) -> StorageResult<Vec<Entity>>;
}
