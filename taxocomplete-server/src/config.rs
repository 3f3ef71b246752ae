//! Server configuration, read from a TOML file.
//!
//! ```toml
//! bind = "127.0.0.1:8080"
//! hash_salt = "change-me-to-a-long-random-string"
//! langcode = "en"
//! fixtures = "fixtures.json"
//! entity_types = ["node"]
//!
//! [[constraints]]
//! target_type = "node"
//! selection_handler = "entityqueue_taxonomy:node"
//! vocabulary = "tags"
//! term = 42
//! payload = { target_bundles = ["article", "page"], match_operator = "CONTAINS" }
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use taxocomplete_crypto::HashSalt;
use taxocomplete_types::{ConstraintPayload, ContextIds, TermId};

/// Environment variable overriding `hash_salt`.
pub const SALT_ENV: &str = "TAXOCOMPLETE_HASH_SALT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP endpoint listens on.
    pub bind: SocketAddr,
    /// Secret keying constraint tokens.
    pub hash_salt: Option<String>,
    /// Language labels are read in.
    pub langcode: Option<String>,
    /// JSON seed for the in-memory entity store.
    pub fixtures: Option<PathBuf>,
    /// Entity types served by a taxonomy selection handler.
    pub entity_types: Vec<String>,
    /// Constraint payloads to store at startup.
    pub constraints: Vec<ConstraintSeed>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            hash_salt: None,
            langcode: None,
            fixtures: None,
            entity_types: vec!["node".to_string()],
            constraints: Vec::new(),
        }
    }
}

/// A constraint payload and the context it is issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSeed {
    pub target_type: String,
    pub selection_handler: String,
    #[serde(default)]
    pub vocabulary: Option<String>,
    #[serde(default)]
    pub term: Option<TermId>,
    #[serde(default)]
    pub payload: ConstraintPayload,
}

impl ConstraintSeed {
    pub fn context(&self) -> ContextIds {
        ContextIds {
            target_type: self.target_type.clone(),
            selection_handler: self.selection_handler.clone(),
            vocabulary: self.vocabulary.clone(),
            term: self.term,
        }
    }
}

impl ServerConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("invalid server configuration")
    }

    /// Reads the configuration file, or returns the defaults when the file
    /// does not exist. Relative fixture paths resolve against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&raw)?;
        if let (Some(fixtures), Some(dir)) = (config.fixtures.as_mut(), path.parent()) {
            if fixtures.is_relative() {
                *fixtures = dir.join(&*fixtures);
            }
        }
        Ok(config)
    }

    /// Picks the hash salt, preferring `env_override` over the file value.
    pub fn resolve_salt(&self, env_override: Option<String>) -> Result<HashSalt> {
        let secret = env_override
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.hash_salt.clone());
        let Some(secret) = secret else {
            bail!("no hash salt configured: set `hash_salt` or {SALT_ENV}");
        };
        HashSalt::from_secret(&secret).context("invalid hash salt")
    }
}
