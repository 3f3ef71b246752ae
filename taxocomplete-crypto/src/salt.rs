//! The process-wide hash salt.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuthError, AuthResult};

/// Minimum salt length in bytes.
pub const MIN_SALT_SIZE: usize = 16;

/// Operator-provisioned secret keying the constraint hash. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HashSalt {
    bytes: Vec<u8>,
}

impl HashSalt {
    /// Creates a salt from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SaltTooShort`] for fewer than [`MIN_SALT_SIZE`] bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> AuthResult<Self> {
        let bytes = bytes.into();
        if bytes.len() < MIN_SALT_SIZE {
            return Err(AuthError::SaltTooShort {
                expected: MIN_SALT_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Creates a salt from a configuration string, used as UTF-8 bytes.
    pub fn from_secret(secret: &str) -> AuthResult<Self> {
        Self::from_bytes(secret.trim().as_bytes())
    }

    /// Generates a random 32-byte salt.
    pub fn random() -> Self {
        let mut bytes = vec![0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Encodes the salt as base64url, the format written to config files.
    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.bytes)
    }

    /// Returns the salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for HashSalt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashSalt")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
