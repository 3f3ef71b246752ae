//! JSON seed data for the in-memory stores.

use serde::{Deserialize, Serialize};
use std::path::Path;

use taxocomplete_types::{Entity, FieldDescriptor};

use crate::StorageResult;

/// Field definitions of one bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleFields {
    pub entity_type: String,
    pub bundle: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// A complete seed: field definitions plus entities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub fields: Vec<BundleFields>,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Fixtures {
    /// Parses fixtures from a JSON string.
    pub fn from_json(json: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads fixtures from a JSON file.
    pub fn load(path: &Path) -> StorageResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
