use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, TermId};

/// String-comparison strategy applied to entity labels.
///
/// Comparison is case-insensitive for every operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOperator {
    #[default]
    #[serde(rename = "CONTAINS")]
    Contains,
    #[serde(rename = "STARTS_WITH")]
    StartsWith,
    #[serde(rename = "ENDS_WITH")]
    EndsWith,
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "<>")]
    NotEquals,
}

impl MatchOperator {
    /// Returns the wire name of the operator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "CONTAINS",
            Self::StartsWith => "STARTS_WITH",
            Self::EndsWith => "ENDS_WITH",
            Self::Equals => "=",
            Self::NotEquals => "<>",
        }
    }

    /// Applies the operator to `value` with `needle` as the right-hand side.
    #[must_use]
    pub fn matches(&self, value: &str, needle: &str) -> bool {
        let value = value.to_lowercase();
        let needle = needle.to_lowercase();
        match self {
            Self::Contains => value.contains(&needle),
            Self::StartsWith => value.starts_with(&needle),
            Self::EndsWith => value.ends_with(&needle),
            Self::Equals => value == needle,
            Self::NotEquals => value != needle,
        }
    }
}

impl fmt::Display for MatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONTAINS" => Ok(Self::Contains),
            "STARTS_WITH" => Ok(Self::StartsWith),
            "ENDS_WITH" => Ok(Self::EndsWith),
            "=" => Ok(Self::Equals),
            "<>" | "!=" => Ok(Self::NotEquals),
            other => Err(Error::UnknownOperator(other.to_string())),
        }
    }
}

/// One taxonomy-scoped lookup: which entities to search, what text to
/// match, and which term they must be tagged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    target_type: String,
    bundles: Vec<String>,
    text: String,
    operator: MatchOperator,
    limit: usize,
    vocabulary: String,
    term: TermId,
}

impl MatchQuery {
    /// Creates a query for `target_type` entities tagged with `term` from
    /// `vocabulary`. Text, operator, bundles and limit default to empty,
    /// `Contains`, none and unlimited.
    pub fn new(target_type: impl Into<String>, vocabulary: impl Into<String>, term: TermId) -> Self {
        Self {
            target_type: target_type.into(),
            bundles: Vec::new(),
            text: String::new(),
            operator: MatchOperator::default(),
            limit: 0,
            vocabulary: vocabulary.into(),
            term,
        }
    }

    /// Restricts the query to the given bundles.
    #[must_use]
    pub fn bundles<I, S>(mut self, bundles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bundles = bundles.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the text fragment and the operator it is matched with.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>, operator: MatchOperator) -> Self {
        self.text = text.into();
        self.operator = operator;
        self
    }

    /// Caps the number of results. Zero means no cap.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    pub fn candidate_bundles(&self) -> &[String] {
        &self.bundles
    }

    pub fn text_fragment(&self) -> &str {
        &self.text
    }

    pub fn operator(&self) -> MatchOperator {
        self.operator
    }

    /// Result cap, or `None` when unlimited.
    pub fn result_limit(&self) -> Option<usize> {
        (self.limit > 0).then_some(self.limit)
    }

    pub fn vocabulary(&self) -> &str {
        &self.vocabulary
    }

    pub fn term(&self) -> TermId {
        self.term
    }
}
