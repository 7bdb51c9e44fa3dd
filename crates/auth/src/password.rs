//! Salted one-way password hashing (bcrypt).

use bcrypt::BcryptError;

use crate::config::HASH_COST;
use crate::error::AuthError;

/// bcrypt only reads this many bytes of input. Longer passwords are refused
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// bcrypt hasher with a fixed work factor.
///
/// Digests are self-describing (`$2b$10$<salt><hash>`), so verification reads
/// the cost and salt back out of the stored string.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self { cost: HASH_COST }
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// Fails for passwords longer than [`MAX_PASSWORD_BYTES`].
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::non_truncating_hash(plaintext, self.cost).map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check a plaintext password against a stored digest.
    ///
    /// A malformed digest never verifies, and neither does an over-long password.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::non_truncating_verify(plaintext, digest) {
            Ok(matches) => matches,
            Err(BcryptError::Truncation(len)) => {
                tracing::debug!(len, "password longer than bcrypt input limit");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored password digest is malformed");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
