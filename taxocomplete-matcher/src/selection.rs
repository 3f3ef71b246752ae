use std::collections::HashMap;
use std::sync::Arc;

use taxocomplete_types::{MatchQuery, MatchResult};

use crate::error::MatcherResult;

/// Strategy for finding the entities an autocomplete field may reference.
///
/// Each implementation serves one target entity type and is registered
/// under a handler ID such as `entityqueue_taxonomy:node`.
pub trait SelectionHandler: Send + Sync {
    /// Handler ID the request path refers to.
    fn id(&self) -> &str;

    /// Entity type this handler selects from.
    fn target_type(&self) -> &str;

    /// Returns the entities matching `query`, grouped by bundle, with
    /// HTML-escaped labels.
    fn referenceable_entities(&self, query: &MatchQuery) -> MatcherResult<MatchResult>;
}

/// Selection handlers by ID.
#[derive(Default, Clone)]
pub struct SelectionHandlerRegistry {
    handlers: HashMap<String, Arc<dyn SelectionHandler>>,
}

impl SelectionHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its own ID, replacing any previous one.
    pub fn register(&mut self, handler: Arc<dyn SelectionHandler>) {
        self.handlers.insert(handler.id().to_string(), handler);
    }

    /// Returns the handler registered as `id` if it serves `target_type`.
    pub fn resolve(&self, id: &str, target_type: &str) -> Option<Arc<dyn SelectionHandler>> {
        self.handlers
            .get(id)
            .filter(|h| h.target_type() == target_type)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for SelectionHandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.handlers.keys().collect();
        ids.sort();
        f.debug_struct("SelectionHandlerRegistry")
            .field("handlers", &ids)
            .finish()
    }
}
