//! Constraint payloads and the context they are bound to.
//!
//! A constraint payload holds the selection options a form element was
//! rendered with (target bundles, match operator, ...). It is stored under a
//! token derived from the payload and a [`ContextIds`] tuple, so a token
//! minted for one vocabulary/term cannot be replayed against another.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{MatchOperator, TermId};

/// The selection options restricting which entities an autocomplete call
/// may return.
///
/// Field order is fixed and `extra` is a sorted map, so the JSON encoding is
/// canonical: the same payload always serializes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPayload {
    /// Bundles of the target entity type the call may search.
    #[serde(default)]
    pub target_bundles: Vec<String>,
    /// String-match strategy; `None` means [`MatchOperator::Contains`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_operator: Option<MatchOperator>,
    /// Any further selection options, carried verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ConstraintPayload {
    /// Creates a payload restricted to the given bundles.
    pub fn for_bundles<I, S>(bundles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target_bundles: bundles.into_iter().map(Into::into).collect(),
            match_operator: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets the match operator.
    #[must_use]
    pub fn with_match_operator(mut self, operator: MatchOperator) -> Self {
        self.match_operator = Some(operator);
        self
    }

    /// Returns the configured operator, defaulting to `Contains`.
    #[must_use]
    pub fn effective_match_operator(&self) -> MatchOperator {
        self.match_operator.unwrap_or_default()
    }

    /// Returns the canonical serialization used for token hashing.
    pub fn canonical_bytes(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// The four context identifiers a constraint token is bound to, in their
/// fixed hashing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextIds {
    /// Entity type being referenced (e.g. `node`).
    pub target_type: String,
    /// Selection handler plugin ID (e.g. `entityqueue_taxonomy:node`).
    pub selection_handler: String,
    /// Vocabulary the matched entities must be tagged from.
    pub vocabulary: Option<String>,
    /// Term the matched entities must be tagged with.
    pub term: Option<TermId>,
}

impl ContextIds {
    /// Creates a context without vocabulary or term.
    pub fn new(target_type: impl Into<String>, selection_handler: impl Into<String>) -> Self {
        Self {
            target_type: target_type.into(),
            selection_handler: selection_handler.into(),
            vocabulary: None,
            term: None,
        }
    }

    /// Binds the context to a vocabulary and term.
    #[must_use]
    pub fn with_term(mut self, vocabulary: impl Into<String>, term: TermId) -> Self {
        self.vocabulary = Some(vocabulary.into());
        self.term = Some(term);
        self
    }

    /// Returns the identifiers as strings in hashing order. Absent optional
    /// identifiers are empty strings.
    #[must_use]
    pub fn hash_parts(&self) -> [String; 4] {
        [
            self.target_type.clone(),
            self.selection_handler.clone(),
            self.vocabulary.clone().unwrap_or_default(),
            self.term.map(|t| t.to_string()).unwrap_or_default(),
        ]
    }
}
