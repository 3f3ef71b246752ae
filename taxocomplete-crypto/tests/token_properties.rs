//! Property-based tests for constraint tokens.
//!
//! - A token issued for a payload and context always authenticates in that context
//! - The returned payload is the stored one, unchanged
//! - Changing the term ID invalidates the token

use std::sync::Arc;

use proptest::prelude::*;
use taxocomplete_crypto::{AuthError, ConstraintAuthenticator, HashSalt};
use taxocomplete_storage::MemoryConstraintStore;
use taxocomplete_types::{ConstraintPayload, ContextIds, TermId};

fn bundles_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z_]{1,12}", 0..5)
}

fn ident_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_:]{1,20}").unwrap()
}

fn salt_strategy() -> impl Strategy<Value = HashSalt> {
    prop::collection::vec(any::<u8>(), 16..64).prop_map(|b| HashSalt::from_bytes(b).unwrap())
}

proptest! {
    #[test]
    fn issued_tokens_roundtrip(
        salt in salt_strategy(),
        bundles in bundles_strategy(),
        target_type in ident_strategy(),
        handler in ident_strategy(),
        vocabulary in ident_strategy(),
        term in any::<u64>(),
    ) {
        let auth = ConstraintAuthenticator::new(salt, Arc::new(MemoryConstraintStore::new()));
        let payload = ConstraintPayload::for_bundles(bundles);
        let ctx = ContextIds::new(target_type, handler).with_term(vocabulary, TermId::new(term));

        let token = auth.issue(&payload, &ctx).unwrap();
        prop_assert_eq!(auth.authenticate(&token, &ctx).unwrap(), payload);
    }

    #[test]
    fn other_term_is_rejected(
        bundles in bundles_strategy(),
        term in any::<u64>(),
        other in any::<u64>(),
    ) {
        prop_assume!(term != other);
        let salt = HashSalt::from_secret("property-test-salt-value").unwrap();
        let auth = ConstraintAuthenticator::new(salt, Arc::new(MemoryConstraintStore::new()));
        let payload = ConstraintPayload::for_bundles(bundles);
        let ctx = ContextIds::new("node", "entityqueue_taxonomy:node").with_term("tags", TermId::new(term));
        let token = auth.issue(&payload, &ctx).unwrap();

        let replay = ContextIds::new("node", "entityqueue_taxonomy:node").with_term("tags", TermId::new(other));
        prop_assert!(matches!(auth.authenticate(&token, &replay), Err(AuthError::Unauthorized)));
    }
}
