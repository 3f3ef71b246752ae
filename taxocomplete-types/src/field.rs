use serde::{Deserialize, Serialize};

/// Reference-handler ID for fields that point at taxonomy terms.
pub const TAXONOMY_TERM_HANDLER: &str = "default:taxonomy_term";

/// Describes one field on one bundle, as reported by the field-metadata
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field_name: String,
    pub field_type: FieldType,
    /// Entity type the field references. Only meaningful for references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
    /// Reference-handler ID (e.g. `default:taxonomy_term`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default)]
    pub handler_settings: HandlerSettings,
}

impl FieldDescriptor {
    /// Shorthand for a taxonomy-term reference field limited to the given
    /// vocabularies.
    pub fn taxonomy_reference<I, S>(field_name: &str, vocabularies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_name: field_name.into(),
            field_type: FieldType::EntityReference,
            target_type: Some("taxonomy_term".into()),
            handler: Some(TAXONOMY_TERM_HANDLER.into()),
            handler_settings: HandlerSettings {
                target_bundles: vocabularies.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Shorthand for an entity reference to some other entity type.
    pub fn entity_reference(field_name: &str, target_type: &str, handler: &str) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: FieldType::EntityReference,
            target_type: Some(target_type.into()),
            handler: Some(handler.into()),
            handler_settings: HandlerSettings::default(),
        }
    }

    /// Shorthand for a non-reference field.
    pub fn plain(field_name: &str, field_type: FieldType) -> Self {
        Self {
            field_name: field_name.into(),
            field_type,
            target_type: None,
            handler: None,
            handler_settings: HandlerSettings::default(),
        }
    }

    /// Returns true if this field references taxonomy terms of `vocabulary`.
    #[must_use]
    pub fn references_vocabulary(&self, vocabulary: &str) -> bool {
        self.field_type == FieldType::EntityReference
            && self.handler.as_deref() == Some(TAXONOMY_TERM_HANDLER)
            && self
                .handler_settings
                .target_bundles
                .iter()
                .any(|b| b == vocabulary)
    }
}

/// Reference-handler settings of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSettings {
    /// Permitted target bundles (vocabularies, for term references).
    #[serde(default)]
    pub target_bundles: Vec<String>,
}

/// The storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    EntityReference,
    String,
    Text,
    Integer,
    Boolean,
    Datetime,
}
