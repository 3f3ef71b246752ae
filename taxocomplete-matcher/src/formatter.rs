//! Conversion of match results into autocomplete suggestions.

use taxocomplete_types::{EntityId, MatchResult, Suggestion};

use crate::{html, tags};

/// Turns matched labels into single-line, tag-encoded suggestion keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionFormatter;

impl SuggestionFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Builds the input value for one entity: `"{label} ({id})"`, with the
    /// label's entities decoded, tags stripped and whitespace collapsed,
    /// then quoted if it contains a comma or double quote.
    ///
    /// Decoding runs before stripping so escaped markup is removed too. Only
    /// the label is cleaned; the ` ({id})` suffix is always kept intact.
    pub fn key(label: &str, id: EntityId) -> String {
        let plain = html::collapse_whitespace(&html::strip_tags(&html::decode_entities(label)));
        let raw = if plain.is_empty() {
            format!("({id})")
        } else {
            format!("{plain} ({id})")
        };
        tags::encode(&raw)
    }

    /// Formats every matched entity, in bundle then entity-ID order.
    pub fn format(&self, result: &MatchResult) -> Vec<Suggestion> {
        result
            .iter()
            .map(|(_, id, label)| Suggestion {
                value: Self::key(label, id),
                label: label.to_string(),
            })
            .collect()
    }
}
