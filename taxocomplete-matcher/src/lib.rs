//! Taxonomy-scoped autocomplete matching.
//!
//! Given a vocabulary, a term and typed text, finds the entities tagged
//! with that term through any field referencing the vocabulary and turns
//! them into tag-encoded suggestions.
//!
//! # Pipeline
//!
//! 1. [`ConstraintAuthenticator`](taxocomplete_crypto::ConstraintAuthenticator)
//!    checks the constraint token against the request context.
//! 2. [`TaxonomyFieldLocator`] finds, per candidate bundle, the entity
//!    reference fields pointing at the vocabulary.
//! 3. [`ScopedEntityMatcher`] queries for entities whose label matches the
//!    typed text and which reference the term through one of those fields.
//! 4. [`SuggestionFormatter`] turns labels into single-line, quote-encoded
//!    suggestion keys.
//!
//! [`AutocompleteService`] wires the steps together for one request.

mod autocomplete;
mod error;
mod formatter;
pub mod html;
mod locator;
mod matcher;
mod selection;
pub mod tags;

pub use autocomplete::{AutocompleteRequest, AutocompleteService, PAGE_SIZE};
pub use error::{AutocompleteError, MatchError, MatcherResult};
pub use formatter::SuggestionFormatter;
pub use locator::{filter_taxonomy_fields, TaxonomyFieldLocator, TaxonomyFields};
pub use matcher::{ScopedEntityMatcher, HANDLER_PREFIX};
pub use selection::{SelectionHandler, SelectionHandlerRegistry};
