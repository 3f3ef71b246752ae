//! Discovery of taxonomy reference fields.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use taxocomplete_storage::FieldMetadataProvider;
use taxocomplete_types::FieldDescriptor;
use tracing::debug;

use crate::error::{MatchError, MatcherResult};

/// Keeps the fields that reference taxonomy terms of `vocabulary`:
/// entity-reference fields using the taxonomy-term handler whose permitted
/// target bundles include the vocabulary.
pub fn filter_taxonomy_fields<'a, I>(fields: I, vocabulary: &str) -> Vec<FieldDescriptor>
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    fields
        .into_iter()
        .filter(|f| f.references_vocabulary(vocabulary))
        .cloned()
        .collect()
}

/// Taxonomy reference fields found for a set of bundles.
///
/// Fields are kept per bundle: two bundles may define a field with the same
/// name but different permitted vocabularies, and only the bundles whose
/// definition references the vocabulary may be matched through it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyFields {
    by_bundle: BTreeMap<String, BTreeMap<String, FieldDescriptor>>,
}

impl TaxonomyFields {
    /// Returns true if no bundle has a matching field.
    pub fn is_empty(&self) -> bool {
        self.by_bundle.values().all(BTreeMap::is_empty)
    }

    /// Union of field names across bundles, de-duplicated.
    pub fn field_names(&self) -> BTreeSet<&str> {
        self.by_bundle
            .values()
            .flat_map(|fields| fields.keys().map(String::as_str))
            .collect()
    }

    /// Union of field descriptors across bundles, de-duplicated by name.
    /// The first bundle (in name order) defining a field wins.
    pub fn descriptors(&self) -> Vec<&FieldDescriptor> {
        let mut seen = BTreeMap::new();
        for fields in self.by_bundle.values() {
            for (name, field) in fields {
                seen.entry(name.as_str()).or_insert(field);
            }
        }
        seen.into_values().collect()
    }

    /// Bundles with at least one matching field.
    pub fn bundles(&self) -> impl Iterator<Item = &str> {
        self.by_bundle
            .iter()
            .filter(|(_, fields)| !fields.is_empty())
            .map(|(bundle, _)| bundle.as_str())
    }

    /// Iterates `(bundle, field)` pairs in bundle then field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.by_bundle.iter().flat_map(|(bundle, fields)| {
            fields.values().map(move |field| (bundle.as_str(), field))
        })
    }

    fn extend(&mut self, bundle: &str, fields: Vec<FieldDescriptor>) {
        if fields.is_empty() {
            return;
        }
        let entry = self.by_bundle.entry(bundle.to_string()).or_default();
        for field in fields {
            entry.insert(field.field_name.clone(), field);
        }
    }
}

/// Finds, per bundle, the fields referencing a vocabulary.
#[derive(Clone)]
pub struct TaxonomyFieldLocator {
    provider: Arc<dyn FieldMetadataProvider>,
}

impl TaxonomyFieldLocator {
    pub fn new(provider: Arc<dyn FieldMetadataProvider>) -> Self {
        Self { provider }
    }

    /// Collects taxonomy fields referencing `vocabulary` on every bundle of
    /// `entity_type` in `bundles`. Finding none is not an error.
    ///
    /// # Errors
    ///
    /// [`MatchError::MetadataUnavailable`] if the provider fails for any bundle.
    pub fn locate(&self, entity_type: &str, bundles: &[String], vocabulary: &str) -> MatcherResult<TaxonomyFields> {
        let mut found = TaxonomyFields::default();
        for bundle in bundles {
            let fields = self
                .provider
                .field_definitions(entity_type, bundle)
                .map_err(MatchError::MetadataUnavailable)?;
            found.extend(bundle, filter_taxonomy_fields(&fields, vocabulary));
        }
        debug!(
            entity_type,
            vocabulary,
            fields = ?found.field_names(),
            "located taxonomy fields"
        );
        Ok(found)
    }
}

impl std::fmt::Debug for TaxonomyFieldLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyFieldLocator").finish_non_exhaustive()
    }
}
