use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{EntityId, TermId};

/// A content entity as returned by the entity loader.
///
/// Only the parts the autocomplete pipeline reads are modeled: the bundle,
/// the label in each available language, and the term IDs held by each
/// reference field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: String,
    pub bundle: String,
    /// Label in the default language.
    pub label: String,
    /// Langcode of the default translation.
    #[serde(default = "default_langcode")]
    pub langcode: String,
    /// Labels of the other translations, by langcode.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    /// Referenced term IDs, by field name.
    #[serde(default)]
    pub references: BTreeMap<String, Vec<TermId>>,
}

fn default_langcode() -> String {
    "en".to_string()
}

impl Entity {
    /// Creates an untranslated entity with no references.
    pub fn new(id: u64, entity_type: &str, bundle: &str, label: &str) -> Self {
        Self {
            id: EntityId::new(id),
            entity_type: entity_type.into(),
            bundle: bundle.into(),
            label: label.into(),
            langcode: default_langcode(),
            translations: BTreeMap::new(),
            references: BTreeMap::new(),
        }
    }

    /// Adds a term reference through `field_name`.
    #[must_use]
    pub fn tagged(mut self, field_name: &str, term: TermId) -> Self {
        self.references.entry(field_name.into()).or_default().push(term);
        self
    }

    /// Adds a translated label.
    #[must_use]
    pub fn translated(mut self, langcode: &str, label: &str) -> Self {
        self.translations.insert(langcode.into(), label.into());
        self
    }

    /// Returns the label for the given context language, falling back to the
    /// default translation when the entity has no such translation.
    #[must_use]
    pub fn translation(&self, langcode: Option<&str>) -> &str {
        match langcode {
            Some(lc) if lc != self.langcode => self
                .translations
                .get(lc)
                .map(String::as_str)
                .unwrap_or(&self.label),
            _ => &self.label,
        }
    }

    /// Returns true if `field_name` holds a reference to `term`.
    #[must_use]
    pub fn references_term(&self, field_name: &str, term: TermId) -> bool {
        self.references
            .get(field_name)
            .is_some_and(|terms| terms.contains(&term))
    }
}
