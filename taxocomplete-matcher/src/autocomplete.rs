//! The autocomplete request pipeline: authenticate, match, format.

use serde::{Deserialize, Serialize};
use taxocomplete_crypto::ConstraintAuthenticator;
use taxocomplete_types::{ContextIds, MatchQuery, Suggestion, TermId};
use tracing::debug;

use crate::error::AutocompleteError;
use crate::formatter::SuggestionFormatter;
use crate::selection::SelectionHandlerRegistry;
use crate::tags;

/// Maximum number of suggestions per request.
pub const PAGE_SIZE: usize = 10;

/// One autocomplete call as received from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteRequest {
    pub target_type: String,
    pub selection_handler: String,
    pub selection_settings_key: String,
    #[serde(default)]
    pub vocabulary: Option<String>,
    #[serde(default)]
    pub term: Option<TermId>,
    /// Raw typed input, a comma-separated tag list.
    #[serde(default)]
    pub q: Option<String>,
}

impl AutocompleteRequest {
    fn context(&self) -> ContextIds {
        ContextIds {
            target_type: self.target_type.clone(),
            selection_handler: self.selection_handler.clone(),
            vocabulary: self.vocabulary.clone(),
            term: self.term,
        }
    }
}

/// Runs autocomplete requests against the registered selection handlers.
#[derive(Debug)]
pub struct AutocompleteService {
    authenticator: ConstraintAuthenticator,
    handlers: SelectionHandlerRegistry,
    formatter: SuggestionFormatter,
}

impl AutocompleteService {
    pub fn new(authenticator: ConstraintAuthenticator, handlers: SelectionHandlerRegistry) -> Self {
        Self {
            authenticator,
            handlers,
            formatter: SuggestionFormatter::new(),
        }
    }

    /// The authenticator, for issuing tokens to form elements.
    pub fn authenticator(&self) -> &ConstraintAuthenticator {
        &self.authenticator
    }

    /// Handles one request.
    ///
    /// An absent or empty `q` yields no suggestions without touching any
    /// store. Otherwise the constraint token is checked first; an empty
    /// typed fragment or a request without vocabulary and term then yields
    /// no suggestions.
    ///
    /// # Errors
    ///
    /// [`AutocompleteError::Unauthorized`] for a bad token,
    /// [`AutocompleteError::UnknownHandler`] when no handler serves the
    /// request, and match failures from the handler.
    pub fn handle(&self, request: &AutocompleteRequest) -> Result<Vec<Suggestion>, AutocompleteError> {
        let Some(input) = request.q.as_deref().filter(|q| !q.is_empty()) else {
            return Ok(Vec::new());
        };
        let typed = tags::last_tag(input).unwrap_or_default().to_lowercase();

        let payload = self
            .authenticator
            .authenticate(&request.selection_settings_key, &request.context())?;

        let handler = self
            .handlers
            .resolve(&request.selection_handler, &request.target_type)
            .ok_or_else(|| AutocompleteError::UnknownHandler {
                handler: request.selection_handler.clone(),
                target_type: request.target_type.clone(),
            })?;

        let (Some(vocabulary), Some(term)) = (request.vocabulary.as_deref(), request.term) else {
            debug!("request not scoped to a term, no suggestions");
            return Ok(Vec::new());
        };
        if typed.is_empty() {
            return Ok(Vec::new());
        }

        let query = MatchQuery::new(&request.target_type, vocabulary, term)
            .bundles(payload.target_bundles.iter().cloned())
            .text(typed, payload.effective_match_operator())
            .limit(PAGE_SIZE);

        let matches = handler.referenceable_entities(&query)?;
        Ok(self.formatter.format(&matches))
    }
}
