use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use taxocomplete_crypto::{compute_token, AuthError, ConstraintAuthenticator, HashSalt};
use taxocomplete_storage::{ConstraintStore, MemoryConstraintStore, StorageError, StorageResult};
use taxocomplete_types::{ConstraintPayload, ContextIds, MatchOperator, TermId};

fn test_salt() -> HashSalt {
    HashSalt::from_secret("0123456789abcdef-test-salt").unwrap()
}

fn context() -> ContextIds {
    ContextIds::new("node", "entityqueue_taxonomy:node").with_term("tags", TermId::new(42))
}

fn payload() -> ConstraintPayload {
    ConstraintPayload::for_bundles(["article", "page"]).with_match_operator(MatchOperator::Contains)
}

fn authenticator() -> (ConstraintAuthenticator, Arc<MemoryConstraintStore>) {
    let store = Arc::new(MemoryConstraintStore::new());
    (ConstraintAuthenticator::new(test_salt(), store.clone()), store)
}

/// Store whose every operation fails.
struct BrokenStore;

impl ConstraintStore for BrokenStore {
    fn get(&self, _token: &str) -> StorageResult<Option<ConstraintPayload>> {
        Err(StorageError::KeyValue("backend down".into()))
    }

    fn set(&self, _token: &str, _payload: &ConstraintPayload) -> StorageResult<()> {
        Err(StorageError::KeyValue("backend down".into()))
    }
}

// ── Issue / authenticate ─────────────────────────────────────────

#[test]
fn issued_token_authenticates_and_returns_payload_unchanged() {
    let (auth, _) = authenticator();
    let token = auth.issue(&payload(), &context()).unwrap();
    assert_eq!(auth.authenticate(&token, &context()).unwrap(), payload());
}

#[test]
fn issue_is_deterministic() {
    let (auth, store) = authenticator();
    let a = auth.issue(&payload(), &context()).unwrap();
    let b = auth.issue(&payload(), &context()).unwrap();
    assert_eq!(a, b);
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn token_is_url_safe() {
    let (auth, _) = authenticator();
    let token = auth.issue(&payload(), &context()).unwrap();
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    assert_eq!(token.len(), 43);
}

#[test]
fn issue_without_term_authenticates_without_term() {
    let (auth, _) = authenticator();
    let ctx = ContextIds::new("node", "default:node");
    let token = auth.issue(&payload(), &ctx).unwrap();
    assert!(auth.authenticate(&token, &ctx).is_ok());
    assert!(matches!(auth.authenticate(&token, &context()), Err(AuthError::Unauthorized)));
}

// ── Rejections ───────────────────────────────────────────────────

#[test]
fn empty_token_is_unauthorized() {
    let (auth, _) = authenticator();
    assert!(matches!(auth.authenticate("", &context()), Err(AuthError::Unauthorized)));
}

#[test]
fn unknown_token_is_unauthorized() {
    let (auth, _) = authenticator();
    let token = compute_token(&test_salt(), &payload(), &context()).unwrap();
    assert!(matches!(auth.authenticate(&token, &context()), Err(AuthError::Unauthorized)));
}

#[test]
fn changing_any_context_identifier_is_unauthorized() {
    let (auth, _) = authenticator();
    let token = auth.issue(&payload(), &context()).unwrap();

    let mut wrong_type = context();
    wrong_type.target_type = "user".into();
    let mut wrong_handler = context();
    wrong_handler.selection_handler = "default:node".into();
    let mut wrong_vocabulary = context();
    wrong_vocabulary.vocabulary = Some("regions".into());
    let mut wrong_term = context();
    wrong_term.term = Some(TermId::new(99));
    let mut no_term = context();
    no_term.term = None;

    for ctx in [wrong_type, wrong_handler, wrong_vocabulary, wrong_term, no_term] {
        assert!(
            matches!(auth.authenticate(&token, &ctx), Err(AuthError::Unauthorized)),
            "context {ctx:?} should be rejected"
        );
    }
}

#[test]
fn identifier_boundaries_are_not_ambiguous() {
    let salt = test_salt();
    let a = ContextIds::new("node", "ab").with_term("c", TermId::new(1));
    let b = ContextIds::new("node", "a").with_term("bc", TermId::new(1));
    assert_ne!(
        compute_token(&salt, &payload(), &a).unwrap(),
        compute_token(&salt, &payload(), &b).unwrap()
    );
}

#[test]
fn tampered_stored_payload_is_unauthorized() {
    let (auth, store) = authenticator();
    let token = auth.issue(&payload(), &context()).unwrap();

    let mut widened = payload();
    widened.target_bundles.push("secret_bundle".into());
    store.set(&token, &widened).unwrap();

    assert!(matches!(auth.authenticate(&token, &context()), Err(AuthError::Unauthorized)));
}

#[test]
fn stored_garbage_token_is_unauthorized() {
    let (auth, store) = authenticator();
    store.set("not base64 !!", &payload()).unwrap();
    assert!(matches!(
        auth.authenticate("not base64 !!", &context()),
        Err(AuthError::Unauthorized)
    ));
}

#[test]
fn different_salt_is_unauthorized() {
    let store = Arc::new(MemoryConstraintStore::new());
    let issuer = ConstraintAuthenticator::new(test_salt(), store.clone());
    let verifier = ConstraintAuthenticator::new(
        HashSalt::from_secret("another-salt-value-entirely").unwrap(),
        store,
    );
    let token = issuer.issue(&payload(), &context()).unwrap();
    assert!(matches!(verifier.authenticate(&token, &context()), Err(AuthError::Unauthorized)));
}

#[test]
fn extra_options_are_bound_into_the_token() {
    let salt = test_salt();
    let mut with_extra = payload();
    with_extra.extra.insert("auto_create".into(), json!(true));
    assert_ne!(
        compute_token(&salt, &payload(), &context()).unwrap(),
        compute_token(&salt, &with_extra, &context()).unwrap()
    );
}

#[test]
fn store_failure_is_not_reported_as_unauthorized() {
    let auth = ConstraintAuthenticator::new(test_salt(), Arc::new(BrokenStore));
    assert!(matches!(
        auth.authenticate("abc", &context()),
        Err(AuthError::Store(StorageError::KeyValue(_)))
    ));
    assert!(matches!(auth.issue(&payload(), &context()), Err(AuthError::Store(_))));
}

// ── HashSalt ─────────────────────────────────────────────────────

#[test]
fn short_salt_is_rejected() {
    assert!(matches!(
        HashSalt::from_secret("short"),
        Err(AuthError::SaltTooShort { expected: 16, actual: 5 })
    ));
}

#[test]
fn salt_debug_is_redacted() {
    let salt = test_salt();
    let debug = format!("{salt:?}");
    assert!(debug.contains("REDACTED"));
    assert!(!debug.contains("test-salt"));
}

#[test]
fn random_salts_differ() {
    let a = HashSalt::random();
    let b = HashSalt::random();
    assert_eq!(a.as_bytes().len(), 32);
    assert_ne!(a.to_base64(), b.to_base64());
}
