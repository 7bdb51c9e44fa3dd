//! Signed, expiring session tokens (JWT, HS256).
//!
//! Tokens are stateless: there is no revocation list, so a leaked token stays
//! valid until `exp`.

use std::sync::Arc;

use chrono::{Duration, SubsecRound};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use crate::claims::TokenClaims;
use crate::clock::Clock;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::principal::Principal;

/// An encoded, signed token string.
///
/// Deliberately has no `Display` impl; tokens should not end up in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Issues and validates tokens with the process-wide signing secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl core::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("lifetime", &self.lifetime)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        let secret = config.signing_secret();

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock, not jsonwebtoken's.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetime: config.token_lifetime(),
            clock,
        }
    }

    /// Issue a token for `principal`, valid for the configured lifetime.
    pub fn issue(&self, principal: &Principal) -> Result<Token, AuthError> {
        let issued_at = self.clock.now().trunc_subsecs(0);
        let claims = TokenClaims::for_principal(principal, issued_at, self.lifetime);

        let encoded = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenIssue(e.to_string()))?;

        tracing::debug!(user_id = %principal.id, expires_at = %claims.expires_at, "token issued");
        Ok(Token(encoded))
    }

    /// Validate a presented token: structure, then signature, then expiry.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation).map_err(|e| {
            let err = classify(&e);
            tracing::debug!(error = %e, kind = err.kind(), "token rejected");
            err
        })?;

        let claims = data.claims;
        claims.check_expiry(self.clock.now())?;
        Ok(claims)
    }
}

fn classify(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::MalformedToken,
    }
}
