use std::fs;
use std::net::SocketAddr;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use taxocomplete_crypto::AuthError;
use taxocomplete_matcher::{AutocompleteError, AutocompleteRequest, MatchError};
use taxocomplete_server::config::ServerConfig;
use taxocomplete_server::{build_state, status_for};
use taxocomplete_storage::StorageError;
use taxocomplete_types::{MatchOperator, TermId};
use tempfile::TempDir;

const FIXTURES: &str = r#"{
  "fields": [
    {
      "entity_type": "node",
      "bundle": "article",
      "fields": [
        {
          "field_name": "field_tags",
          "field_type": "entity_reference",
          "target_type": "taxonomy_term",
          "handler": "default:taxonomy_term",
          "handler_settings": { "target_bundles": ["tags"] }
        },
        { "field_name": "body", "field_type": "text" }
      ]
    }
  ],
  "entities": [
    {
      "id": 7,
      "entity_type": "node",
      "bundle": "article",
      "label": "Cats, Inc.",
      "translations": { "fr": "Chats SA" },
      "references": { "field_tags": [42] }
    }
  ]
}"#;

const CONFIG: &str = r#"
bind = "0.0.0.0:9090"
hash_salt = "a-config-file-hash-salt"
langcode = "fr"
fixtures = "fixtures.json"

[[constraints]]
target_type = "node"
selection_handler = "entityqueue_taxonomy:node"
vocabulary = "tags"
term = 42
payload = { target_bundles = ["article"], match_operator = "STARTS_WITH" }
"#;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    fs::write(dir.path().join("fixtures.json"), FIXTURES).unwrap();
    let path = dir.path().join("taxocomplete.toml");
    fs::write(&path, CONFIG).unwrap();
    path
}

#[test]
fn defaults_when_fields_are_omitted() {
    let config = ServerConfig::from_toml("").unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 8080)));
    assert_eq!(config.entity_types, vec!["node".to_string()]);
    assert!(config.constraints.is_empty());
}

#[test]
fn parses_constraint_seeds() {
    let config = ServerConfig::from_toml(CONFIG).unwrap();
    assert_eq!(config.bind.port(), 9090);
    assert_eq!(config.langcode.as_deref(), Some("fr"));

    let seed = &config.constraints[0];
    assert_eq!(seed.payload.target_bundles, vec!["article".to_string()]);
    assert_eq!(seed.payload.effective_match_operator(), MatchOperator::StartsWith);

    let context = seed.context();
    assert_eq!(context.vocabulary.as_deref(), Some("tags"));
    assert_eq!(context.term, Some(TermId::new(42)));
}

#[test]
fn rejects_malformed_toml() {
    assert!(ServerConfig::from_toml("bind = 12").is_err());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn relative_fixtures_resolve_against_config_dir() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig::load(&write_config(&dir)).unwrap();
    assert_eq!(config.fixtures, Some(dir.path().join("fixtures.json")));
}

#[test]
fn env_salt_overrides_file_salt() {
    let config = ServerConfig::from_toml(CONFIG).unwrap();
    let from_file = config.resolve_salt(None).unwrap();
    let from_env = config
        .resolve_salt(Some("an-environment-hash-salt".into()))
        .unwrap();
    assert_eq!(from_file.as_bytes(), b"a-config-file-hash-salt");
    assert_eq!(from_env.as_bytes(), b"an-environment-hash-salt");

    let blank_env = config.resolve_salt(Some("   ".into())).unwrap();
    assert_eq!(blank_env.as_bytes(), b"a-config-file-hash-salt");
}

#[test]
fn missing_or_short_salt_is_an_error() {
    let config = ServerConfig::default();
    assert!(config.resolve_salt(None).is_err());
    assert!(config.resolve_salt(Some("short".into())).is_err());
}

#[test]
fn built_state_serves_seeded_fixtures() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig::load(&write_config(&dir)).unwrap();
    let salt = config.resolve_salt(None).unwrap();
    let state = build_state(&config, salt).unwrap();

    let seed = &config.constraints[0];
    let token = state
        .service()
        .authenticator()
        .issue(&seed.payload, &seed.context())
        .unwrap();

    let request = AutocompleteRequest {
        target_type: "node".into(),
        selection_handler: "entityqueue_taxonomy:node".into(),
        selection_settings_key: token,
        vocabulary: Some("tags".into()),
        term: Some(TermId::new(42)),
        q: Some("chat".into()),
    };
    let suggestions = state.service().handle(&request).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].label, "Chats SA");
    assert_eq!(suggestions[0].value, "Chats SA (7)");
}

#[test]
fn missing_fixtures_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig {
        fixtures: Some(dir.path().join("nope.json")),
        ..ServerConfig::default()
    };
    let salt = taxocomplete_crypto::HashSalt::random();
    assert!(build_state(&config, salt).is_err());
}

#[test]
fn errors_map_to_statuses() {
    assert_eq!(status_for(&AutocompleteError::Unauthorized), StatusCode::FORBIDDEN);
    assert_eq!(
        status_for(&AutocompleteError::UnknownHandler {
            handler: "default:node".into(),
            target_type: "node".into(),
        }),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        status_for(&AutocompleteError::Authentication(AuthError::Store(StorageError::Lock))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_for(&AutocompleteError::Match(MatchError::StorageFailure(StorageError::Lock))),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
