use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use gatehouse_core::UserId;

use crate::error::AuthError;
use crate::principal::Principal;

/// Claims carried inside every issued token.
///
/// Field names follow the registered JWT claim names on the wire (`sub`,
/// `iat`, `exp`), with timestamps as whole Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "sub")]
    pub subject: UserId,

    pub login: String,

    pub email: String,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Claims for `principal`, valid from `issued_at` for `lifetime`.
    pub fn for_principal(principal: &Principal, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            subject: principal.id,
            login: principal.login.clone(),
            email: principal.email.clone(),
            issued_at,
            expires_at: issued_at + lifetime,
        }
    }

    /// A token is valid up to and including `expires_at`.
    pub fn check_expiry(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if now > self.expires_at {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }

    pub fn principal(&self) -> Principal {
        Principal {
            id: self.subject,
            login: self.login.clone(),
            email: self.email.clone(),
        }
    }
}
