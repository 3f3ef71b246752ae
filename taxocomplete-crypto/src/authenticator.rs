//! Constraint token issuance and verification.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use taxocomplete_storage::ConstraintStore;
use taxocomplete_types::{ConstraintPayload, ContextIds};
use tracing::{debug, warn};

use crate::error::{AuthError, AuthResult};
use crate::salt::HashSalt;

type HmacSha256 = Hmac<Sha256>;

/// Keys a MAC over the canonical payload followed by each context
/// identifier, every identifier preceded by a NUL separator.
fn keyed_mac(salt: &HashSalt, payload: &ConstraintPayload, context: &ContextIds) -> AuthResult<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(salt.as_bytes()).map_err(|_| AuthError::SaltTooShort {
        expected: crate::MIN_SALT_SIZE,
        actual: salt.as_bytes().len(),
    })?;
    mac.update(&payload.canonical_bytes()?);
    for part in context.hash_parts() {
        mac.update(&[0]);
        mac.update(part.as_bytes());
    }
    Ok(mac)
}

/// Computes the token binding `payload` to `context`.
pub fn compute_token(salt: &HashSalt, payload: &ConstraintPayload, context: &ContextIds) -> AuthResult<String> {
    let mac = keyed_mac(salt, payload, context)?;
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// Verifies constraint tokens against the payloads stored under them.
pub struct ConstraintAuthenticator {
    salt: HashSalt,
    store: Arc<dyn ConstraintStore>,
}

impl ConstraintAuthenticator {
    /// Creates an authenticator keyed with `salt` that reads payloads from `store`.
    pub fn new(salt: HashSalt, store: Arc<dyn ConstraintStore>) -> Self {
        Self { salt, store }
    }

    /// Computes the token for `payload` in `context` and stores the payload
    /// under it. Issuing the same payload and context twice yields the same
    /// token.
    pub fn issue(&self, payload: &ConstraintPayload, context: &ContextIds) -> AuthResult<String> {
        let token = compute_token(&self.salt, payload, context)?;
        self.store.set(&token, payload)?;
        debug!(
            target_type = %context.target_type,
            handler = %context.selection_handler,
            "issued constraint token"
        );
        Ok(token)
    }

    /// Returns the payload stored under `token` if the token matches the
    /// payload and `context`.
    ///
    /// # Errors
    ///
    /// [`AuthError::Unauthorized`] when the token is empty, unknown, or was
    /// computed for a different payload or context. Store failures surface
    /// as [`AuthError::Store`].
    pub fn authenticate(&self, token: &str, context: &ContextIds) -> AuthResult<ConstraintPayload> {
        if token.is_empty() {
            warn!("rejected empty constraint token");
            return Err(AuthError::Unauthorized);
        }

        let Some(payload) = self.store.get(token)? else {
            warn!(target_type = %context.target_type, "constraint token not found");
            return Err(AuthError::Unauthorized);
        };

        let expected = URL_SAFE_NO_PAD.decode(token).map_err(|_| {
            warn!(target_type = %context.target_type, "constraint token is not base64url");
            AuthError::Unauthorized
        })?;

        keyed_mac(&self.salt, &payload, context)?
            .verify_slice(&expected)
            .map_err(|_| {
                warn!(
                    target_type = %context.target_type,
                    handler = %context.selection_handler,
                    "constraint token does not match payload and context"
                );
                AuthError::Unauthorized
            })?;

        Ok(payload)
    }
}

impl std::fmt::Debug for ConstraintAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintAuthenticator")
            .field("salt", &self.salt)
            .finish_non_exhaustive()
    }
}
