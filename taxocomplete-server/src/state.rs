use std::sync::Arc;

use anyhow::{Context, Result};
use taxocomplete_crypto::{ConstraintAuthenticator, HashSalt};
use taxocomplete_matcher::{AutocompleteService, ScopedEntityMatcher, SelectionHandlerRegistry};
use taxocomplete_storage::{Fixtures, MemoryConstraintStore, MemoryEntityStore};
use tracing::info;

use crate::config::ServerConfig;

/// Shared state of the HTTP endpoint.
#[derive(Debug)]
pub struct AppState {
    service: AutocompleteService,
}

impl AppState {
    pub fn new(service: AutocompleteService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &AutocompleteService {
        &self.service
    }
}

/// Wires in-memory stores, one taxonomy matcher per configured entity type,
/// and the authenticator, then issues the configured constraint seeds.
pub fn build_state(config: &ServerConfig, salt: HashSalt) -> Result<AppState> {
    let fixtures = match &config.fixtures {
        Some(path) => Fixtures::load(path)
            .with_context(|| format!("failed to load fixtures {}", path.display()))?,
        None => Fixtures::default(),
    };
    let entities = Arc::new(MemoryEntityStore::from_fixtures(fixtures)?);
    info!(entities = entities.entity_count()?, "entity store ready");

    let mut handlers = SelectionHandlerRegistry::new();
    for entity_type in &config.entity_types {
        let mut matcher = ScopedEntityMatcher::new(
            entity_type,
            entities.clone(),
            entities.clone(),
            entities.clone(),
        );
        if let Some(langcode) = &config.langcode {
            matcher = matcher.with_langcode(langcode.clone());
        }
        handlers.register(Arc::new(matcher));
    }

    let authenticator = ConstraintAuthenticator::new(salt, Arc::new(MemoryConstraintStore::new()));
    let service = AutocompleteService::new(authenticator, handlers);

    for seed in &config.constraints {
        let token = service
            .authenticator()
            .issue(&seed.payload, &seed.context())
            .context("failed to issue constraint token")?;
        info!(
            target_type = %seed.target_type,
            handler = %seed.selection_handler,
            vocabulary = ?seed.vocabulary,
            term = ?seed.term,
            %token,
            "constraint token ready"
        );
    }

    Ok(AppState::new(service))
}
