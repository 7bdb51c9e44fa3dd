use thiserror::Error;

/// Authentication failure.
///
/// The four token kinds (`MissingToken`, `MalformedToken`, `InvalidSignature`,
/// `TokenExpired`) are internal diagnostics only. The HTTP layer collapses
/// them into a single "unauthorized" response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown login or wrong password. Deliberately indistinguishable.
    #[error("login or password provided is incorrect")]
    InvalidCredentials,

    #[error("missing bearer token")]
    MissingToken,

    #[error("malformed token")]
    MalformedToken,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    TokenExpired,

    /// The credential store could not answer (transient).
    #[error("credential store unavailable: {0}")]
    CredentialStore(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token issuance failed: {0}")]
    TokenIssue(String),
}

impl AuthError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::CredentialStore(_) => "credential_store",
            AuthError::Hashing(_) => "hashing",
            AuthError::TokenIssue(_) => "token_issue",
        }
    }
}

