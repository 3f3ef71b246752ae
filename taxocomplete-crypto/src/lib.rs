//! Constraint token authentication.
//!
//! An autocomplete form element stores its selection options in a
//! key/value store under a token:
//!
//! ```text
//! token = base64url(HMAC-SHA256(salt, canonical(payload) ‖ 0 ‖ type ‖ 0 ‖ handler ‖ 0 ‖ vocabulary ‖ 0 ‖ term))
//! ```
//!
//! The autocomplete request carries only the token and the context
//! identifiers. [`ConstraintAuthenticator::authenticate`] fetches the
//! payload and recomputes the token; a mismatch means either the payload or
//! the context was tampered with, and the request is rejected.
//!
//! The salt is injected as a [`HashSalt`] value so tests can use fixed keys.

mod authenticator;
mod error;
mod salt;

pub use authenticator::{compute_token, ConstraintAuthenticator};
pub use error::{AuthError, AuthResult};
pub use salt::{HashSalt, MIN_SALT_SIZE};
