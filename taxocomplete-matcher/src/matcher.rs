//! Taxonomy-scoped entity matching.

use std::sync::Arc;

use taxocomplete_storage::{
    Condition, ConditionGroup, EntityLoader, EntityQuery, EntityQueryExecutor,
    FieldMetadataProvider,
};
use taxocomplete_types::{MatchQuery, MatchResult};
use tracing::debug;

use crate::error::{MatchError, MatcherResult};
use crate::html;
use crate::locator::{TaxonomyFieldLocator, TaxonomyFields};
use crate::selection::SelectionHandler;

/// Handler ID prefix of taxonomy-scoped selection handlers.
pub const HANDLER_PREFIX: &str = "entityqueue_taxonomy";

/// Selection handler returning entities whose label matches the typed text
/// and which are tagged with a given term through any field referencing
/// the term's vocabulary.
pub struct ScopedEntityMatcher {
    id: String,
    target_type: String,
    locator: TaxonomyFieldLocator,
    executor: Arc<dyn EntityQueryExecutor>,
    loader: Arc<dyn EntityLoader>,
    langcode: Option<String>,
}

impl ScopedEntityMatcher {
    /// Creates the matcher for `target_type`, registered as
    /// `entityqueue_taxonomy:{target_type}`.
    pub fn new(
        target_type: &str,
        metadata: Arc<dyn FieldMetadataProvider>,
        executor: Arc<dyn EntityQueryExecutor>,
        loader: Arc<dyn EntityLoader>,
    ) -> Self {
        Self {
            id: format!("{HANDLER_PREFIX}:{target_type}"),
            target_type: target_type.to_string(),
            locator: TaxonomyFieldLocator::new(metadata),
            executor,
            loader,
            langcode: None,
        }
    }

    /// Reads labels from the `langcode` translation when entities have one.
    /// The typed text is matched against that same translation.
    #[must_use]
    pub fn with_langcode(mut self, langcode: impl Into<String>) -> Self {
        self.langcode = Some(langcode.into());
        self
    }

    /// Builds the entity query for `query` given the located fields.
    ///
    /// The term condition is an OR across every (bundle, field) pair, each
    /// pair scoped to its own bundle, ANDed with the bundle filter and the
    /// label condition.
    pub fn build_query(&self, query: &MatchQuery, fields: &TaxonomyFields) -> EntityQuery {
        let mut entity_query = EntityQuery::new(query.target_type())
            .condition(Condition::BundleIn(query.candidate_bundles().to_vec()));

        if !query.text_fragment().is_empty() {
            entity_query = entity_query.condition(Condition::Label {
                operator: query.operator(),
                value: query.text_fragment().to_string(),
                langcode: self.langcode.clone(),
            });
        }

        let tagged = fields.iter().fold(ConditionGroup::or(), |or, (bundle, field)| {
            or.condition(Condition::Group(
                ConditionGroup::and()
                    .condition(Condition::BundleIn(vec![bundle.to_string()]))
                    .condition(Condition::FieldEquals {
                        field: field.field_name.clone(),
                        term: query.term(),
                    }),
            ))
        });
        entity_query = entity_query.group(tagged);

        match query.result_limit() {
            Some(limit) => entity_query.range(0, limit),
            None => entity_query,
        }
    }

    /// Runs the full lookup.
    ///
    /// Returns an empty result without querying when no candidate bundle
    /// has a field referencing the vocabulary.
    pub fn match_entities(&self, query: &MatchQuery) -> MatcherResult<MatchResult> {
        let fields = self
            .locator
            .locate(query.target_type(), query.candidate_bundles(), query.vocabulary())?;
        if fields.is_empty() {
            debug!(
                vocabulary = query.vocabulary(),
                "no taxonomy fields on candidate bundles, skipping query"
            );
            return Ok(MatchResult::new());
        }

        let entity_query = self.build_query(query, &fields);
        let ids = self
            .executor
            .execute(&entity_query)
            .map_err(MatchError::StorageFailure)?;
        if ids.is_empty() {
            return Ok(MatchResult::new());
        }

        let entities = self
            .loader
            .load_multiple(query.target_type(), &ids)
            .map_err(MatchError::StorageFailure)?;

        let mut result = MatchResult::new();
        for entity in &entities {
            let label = entity.translation(self.langcode.as_deref());
            result.insert(entity.bundle.clone(), entity.id, html::escape(label));
        }
        debug!(term = %query.term(), matched = result.len(), "matched entities");
        Ok(result)
    }
}

impl SelectionHandler for ScopedEntityMatcher {
    fn id(&self) -> &str {
        &self.id
    }

    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn referenceable_entities(&self, query: &MatchQuery) -> MatcherResult<MatchResult> {
        self.match_entities(query)
    }
}

impl std::fmt::Debug for ScopedEntityMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedEntityMatcher")
            .field("id", &self.id)
            .field("langcode", &self.langcode)
            .finish_non_exhaustive()
    }
}
