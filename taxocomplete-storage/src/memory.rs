//! In-memory collaborators.
//!
//! Both stores guard their maps with an `RwLock` so a single instance can
//! be shared across request handlers behind an `Arc`.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use taxocomplete_types::{ConstraintPayload, Entity, EntityId, FieldDescriptor};
use tracing::debug;

use crate::{
    ConstraintStore, EntityLoader, EntityQuery, EntityQueryExecutor, FieldMetadataProvider,
    Fixtures, StorageError, StorageResult,
};

/// Constraint payloads keyed by token.
#[derive(Debug, Default)]
pub struct MemoryConstraintStore {
    entries: RwLock<HashMap<String, ConstraintPayload>>,
}

impl MemoryConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads.
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.entries.read().map_err(|_| StorageError::Lock)?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl ConstraintStore for MemoryConstraintStore {
    fn get(&self, token: &str) -> StorageResult<Option<ConstraintPayload>> {
        let entries = self.entries.read().map_err(|_| StorageError::Lock)?;
        Ok(entries.get(token).cloned())
    }

    fn set(&self, token: &str, payload: &ConstraintPayload) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Lock)?;
        entries.insert(token.to_string(), payload.clone());
        Ok(())
    }
}

/// Field definitions and entities for any number of entity types.
///
/// Query execution scans every entity of the queried type and returns
/// matching IDs in ascending order before applying the range.
#[derive(Debug, Default)]
pub struct MemoryEntityStore {
    fields: RwLock<HashMap<(String, String), Vec<FieldDescriptor>>>,
    entities: RwLock<BTreeMap<(String, EntityId), Entity>>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from fixture data.
    pub fn from_fixtures(fixtures: Fixtures) -> StorageResult<Self> {
        let store = Self::new();
        for bundle in fixtures.fields {
            store.define_fields(&bundle.entity_type, &bundle.bundle, bundle.fields)?;
        }
        for entity in fixtures.entities {
            store.insert(entity)?;
        }
        Ok(store)
    }

    /// Replaces the field definitions of a bundle.
    pub fn define_fields(
        &self,
        entity_type: &str,
        bundle: &str,
        fields: Vec<FieldDescriptor>,
    ) -> StorageResult<()> {
        let mut map = self.fields.write().map_err(|_| StorageError::Lock)?;
        map.insert((entity_type.to_string(), bundle.to_string()), fields);
        Ok(())
    }

    /// Inserts or replaces an entity.
    pub fn insert(&self, entity: Entity) -> StorageResult<()> {
        let mut map = self.entities.write().map_err(|_| StorageError::Lock)?;
        map.insert((entity.entity_type.clone(), entity.id), entity);
        Ok(())
    }

    /// Number of stored entities across all types.
    pub fn entity_count(&self) -> StorageResult<usize> {
        Ok(self.entities.read().map_err(|_| StorageError::Lock)?.len())
    }
}

impl FieldMetadataProvider for MemoryEntityStore {
    fn field_definitions(&self, entity_type: &str, bundle: &str) -> StorageResult<Vec<FieldDescriptor>> {
        let map = self.fields.read().map_err(|_| StorageError::Lock)?;
        Ok(map
            .get(&(entity_type.to_string(), bundle.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

impl EntityQueryExecutor for MemoryEntityStore {
    fn execute(&self, query: &EntityQuery) -> StorageResult<Vec<EntityId>> {
        let map = self.entities.read().map_err(|_| StorageError::Lock)?;
        let matching = map
            .values()
            .filter(|e| query.matches(e))
            .map(|e| e.id);
        let ids: Vec<EntityId> = match query.range_bounds() {
            Some((start, length)) => matching.skip(start).take(length).collect(),
            None => matching.collect(),
        };
        debug!(query = %query, matched = ids.len(), "executed entity query");
        Ok(ids)
    }
}

impl EntityLoader for MemoryEntityStore {
    fn load_multiple(&self, entity_type: &str, ids: &[EntityId]) -> StorageResult<Vec<Entity>> {
        let map = self.entities.read().map_err(|_| StorageError::Lock)?;
        Ok(ids
            .iter()
            .filter_map(|id| map.get(&(entity_type.to_string(), *id)).cloned())
            .collect())
    }
}
