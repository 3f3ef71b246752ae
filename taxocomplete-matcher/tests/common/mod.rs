//! Shared fixtures for matcher tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use taxocomplete_crypto::{ConstraintAuthenticator, HashSalt};
use taxocomplete_matcher::{AutocompleteService, ScopedEntityMatcher, SelectionHandlerRegistry};
use taxocomplete_storage::{
    EntityLoader, EntityQuery, EntityQueryExecutor, FieldMetadataProvider, MemoryConstraintStore,
    MemoryEntityStore, StorageError, StorageResult,
};
use taxocomplete_types::{Entity, EntityId, FieldDescriptor, FieldType, TermId};

pub const VOCABULARY: &str = "V";
pub const TERM: TermId = TermId::new(42);
pub const HANDLER: &str = "entityqueue_taxonomy:node";

/// `article` carries `field_tags` referencing `V`; `page` has no taxonomy
/// field. Entity 7 "Cats, Inc." is tagged with term 42.
pub fn catalog_store() -> Arc<MemoryEntityStore> {
    let store = MemoryEntityStore::new();
    store
        .define_fields(
            "node",
            "article",
            vec![
                FieldDescriptor::plain("body", FieldType::Text),
                FieldDescriptor::entity_reference("uid", "user", "default:user"),
                FieldDescriptor::taxonomy_reference("field_tags", [VOCABULARY]),
            ],
        )
        .unwrap();
    store
        .define_fields(
            "node",
            "page",
            vec![FieldDescriptor::taxonomy_reference("field_regions", ["regions"])],
        )
        .unwrap();

    store
        .insert(Entity::new(7, "node", "article", "Cats, Inc.").tagged("field_tags", TERM))
        .unwrap();
    store
        .insert(Entity::new(8, "node", "article", "Dogs Ltd.").tagged("field_tags", TERM))
        .unwrap();
    store
        .insert(Entity::new(9, "node", "article", "Caterpillars").tagged("field_tags", TermId::new(43)))
        .unwrap();
    store
        .insert(Entity::new(10, "node", "page", "Cathedral").tagged("field_regions", TERM))
        .unwrap();
    Arc::new(store)
}

/// Wraps an executor and counts calls.
pub struct CountingExecutor {
    inner: Arc<dyn EntityQueryExecutor>,
    calls: AtomicUsize,
    pub last_query: std::sync::Mutex<Option<EntityQuery>>,
}

impl CountingExecutor {
    pub fn new(inner: Arc<dyn EntityQueryExecutor>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            last_query: std::sync::Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EntityQueryExecutor for CountingExecutor {
    fn execute(&self, query: &EntityQuery) -> StorageResult<Vec<EntityId>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());
        self.inner.execute(query)
    }
}

/// A collaborator whose every call fails.
pub struct FailingStore;

impl FieldMetadataProvider for FailingStore {
    fn field_definitions(&self, _entity_type: &str, _bundle: &str) -> StorageResult<Vec<FieldDescriptor>> {
        Err(StorageError::Metadata("field cache offline".into()))
    }
}

impl EntityQueryExecutor for FailingStore {
    fn execute(&self, _query: &EntityQuery) -> StorageResult<Vec<EntityId>> {
        Err(StorageError::Query("connection reset".into()))
    }
}

impl EntityLoader for FailingStore {
    fn load_multiple(&self, _entity_type: &str, _ids: &[EntityId]) -> StorageResult<Vec<Entity>> {
        Err(StorageError::Load("connection reset".into()))
    }
}

pub fn matcher(store: Arc<MemoryEntityStore>) -> ScopedEntityMatcher {
    ScopedEntityMatcher::new("node", store.clone(), store.clone(), store)
}

pub fn test_salt() -> HashSalt {
    HashSalt::from_secret("matcher-tests-hash-salt").unwrap()
}

/// A service over `catalog_store`, plus the executor counter.
pub fn service() -> (AutocompleteService, Arc<CountingExecutor>) {
    let store = catalog_store();
    let executor = Arc::new(CountingExecutor::new(store.clone()));
    let matcher = ScopedEntityMatcher::new("node", store.clone(), executor.clone(), store);

    let mut handlers = SelectionHandlerRegistry::new();
    handlers.register(Arc::new(matcher));

    let authenticator = ConstraintAuthenticator::new(test_salt(), Arc::new(MemoryConstraintStore::new()));
    (AutocompleteService::new(authenticator, handlers), executor)
}
