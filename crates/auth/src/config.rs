//! Process-wide authentication configuration.
//!
//! Built once at startup and shared by reference; nothing in this crate reads
//! the environment on its own.

use chrono::Duration;
use secrecy::{ExposeSecret, SecretSlice};
use thiserror::Error;

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// bcrypt work factor used for every new digest.
pub const HASH_COST: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("signing secret must not be empty")]
    EmptySecret,
}

/// Immutable configuration for the token codec and password hasher.
///
/// Only the signing secret varies between deployments. Token lifetime and
/// hash cost are fixed constants.
#[derive(Debug)]
pub struct AuthConfig {
    signing_secret: SecretSlice<u8>,
}

impl AuthConfig {
    pub fn new(signing_secret: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let secret: Vec<u8> = signing_secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            signing_secret: SecretSlice::from(secret),
        })
    }

    pub(crate) fn signing_secret(&self) -> &[u8] {
        self.signing_secret.expose_secret()
    }

    pub fn token_lifetime(&self) -> Duration {
        Duration::hours(TOKEN_LIFETIME_HOURS)
    }

    pub fn hash_cost(&self) -> u32 {
        HASH_COST
    }
}
