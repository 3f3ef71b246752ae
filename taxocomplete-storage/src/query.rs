//! Entity query builder.
//!
//! Queries are a tree of condition groups. The top-level group of an
//! [`EntityQuery`] is always a conjunction; nested groups may be either
//! conjunctive or disjunctive.

use std::fmt;

use taxocomplete_types::{Entity, MatchOperator, TermId};

/// How the conditions of a group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
}

/// A single predicate over an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Entity bundle is one of the listed bundles.
    BundleIn(Vec<String>),
    /// Entity label in `langcode` (default translation when `None` or
    /// untranslated) compared against `value` with `operator`.
    Label {
        operator: MatchOperator,
        value: String,
        langcode: Option<String>,
    },
    /// Reference field `field` holds `term`.
    FieldEquals { field: String, term: TermId },
    /// A nested group.
    Group(ConditionGroup),
}

impl Condition {
    /// Evaluates the condition against an entity.
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            Self::BundleIn(bundles) => bundles.iter().any(|b| *b == entity.bundle),
            Self::Label {
                operator,
                value,
                langcode,
            } => operator.matches(entity.translation(langcode.as_deref()), value),
            Self::FieldEquals { field, term } => entity.references_term(field, *term),
            Self::Group(group) => group.matches(entity),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BundleIn(bundles) => write!(f, "bundle IN ({})", bundles.join(", ")),
            Self::Label {
                operator,
                value,
                langcode: Some(lc),
            } => write!(f, "label[{lc}] {operator} {value:?}"),
            Self::Label {
                operator,
                value,
                langcode: None,
            } => write!(f, "label {operator} {value:?}"),
            Self::FieldEquals { field, term } => write!(f, "{field} = {term}"),
            Self::Group(group) => write!(f, "({group})"),
        }
    }
}

/// A conjunctive or disjunctive group of conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionGroup {
    conjunction: Conjunction,
    conditions: Vec<Condition>,
}

impl ConditionGroup {
    /// Creates an empty AND group.
    #[must_use]
    pub fn and() -> Self {
        Self {
            conjunction: Conjunction::And,
            conditions: Vec::new(),
        }
    }

    /// Creates an empty OR group.
    #[must_use]
    pub fn or() -> Self {
        Self {
            conjunction: Conjunction::Or,
            conditions: Vec::new(),
        }
    }

    /// Appends a condition.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluates the group. An empty AND group matches everything; an empty
    /// OR group matches nothing.
    pub fn matches(&self, entity: &Entity) -> bool {
        match self.conjunction {
            Conjunction::And => self.conditions.iter().all(|c| c.matches(entity)),
            Conjunction::Or => self.conditions.iter().any(|c| c.matches(entity)),
        }
    }
}

impl fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.conjunction {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
        };
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}

/// A query over one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityQuery {
    entity_type: String,
    conditions: ConditionGroup,
    range: Option<(usize, usize)>,
}

impl EntityQuery {
    /// Creates an unconditional query over `entity_type`.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            conditions: ConditionGroup::and(),
            range: None,
        }
    }

    /// ANDs a condition into the query.
    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions = self.conditions.condition(condition);
        self
    }

    /// ANDs a nested group into the query.
    #[must_use]
    pub fn group(self, group: ConditionGroup) -> Self {
        self.condition(Condition::Group(group))
    }

    /// Limits the result to `length` IDs starting at `start`.
    #[must_use]
    pub fn range(mut self, start: usize, length: usize) -> Self {
        self.range = Some((start, length));
        self
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn conditions(&self) -> &ConditionGroup {
        &self.conditions
    }

    pub fn range_bounds(&self) -> Option<(usize, usize)> {
        self.range
    }

    /// Returns true if `entity` is of the queried type and satisfies every
    /// condition.
    pub fn matches(&self, entity: &Entity) -> bool {
        entity.entity_type == self.entity_type && self.conditions.matches(entity)
    }
}

impl fmt::Display for EntityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entity_type)?;
        if !self.conditions.is_empty() {
            write!(f, " WHERE {}", self.conditions)?;
        }
        if let Some((start, length)) = self.range {
            write!(f, " RANGE {start}, {length}")?;
        }
        Ok(())
    }
}
