use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::EntityId;

/// Matched entities grouped by bundle, then by entity ID.
///
/// Labels are already HTML-escaped by the matcher. Both levels are sorted
/// maps, so iteration order is bundle name then entity ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchResult {
    groups: BTreeMap<String, BTreeMap<EntityId, String>>,
}

impl MatchResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a matched entity under its bundle.
    pub fn insert(&mut self, bundle: impl Into<String>, id: EntityId, label: impl Into<String>) {
        self.groups
            .entry(bundle.into())
            .or_default()
            .insert(id, label.into());
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(BTreeMap::is_empty)
    }

    /// Total number of matched entities across all bundles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    /// Returns the entities matched in one bundle.
    #[must_use]
    pub fn bundle(&self, bundle: &str) -> Option<&BTreeMap<EntityId, String>> {
        self.groups.get(bundle)
    }

    /// Iterates `(bundle, id, label)` in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntityId, &str)> {
        self.groups.iter().flat_map(|(bundle, entities)| {
            entities
                .iter()
                .map(move |(id, label)| (bundle.as_str(), *id, label.as_str()))
        })
    }
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Tag-encoded `"{label} ({id})"` key placed into the input on select.
    pub value: String,
    /// Label shown in the dropdown.
    pub label: String,
}
