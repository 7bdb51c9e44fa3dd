//! Authentication core for gatehouse: password hashing, credential
//! verification, token issuance/validation and the default-deny access guard.
//!
//! This crate is intentionally decoupled from HTTP and storage. The credential
//! store is reached through the [`CredentialStore`] trait; the HTTP layer feeds
//! the guard a route identity and a raw `Authorization` header.

pub mod claims;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod password;
pub mod policy;
pub mod principal;
pub mod token;

pub use claims::TokenClaims;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AuthConfig, ConfigError, HASH_COST, TOKEN_LIFETIME_HOURS};
pub use credentials::{CredentialRecord, CredentialStore, CredentialStoreError, CredentialVerifier};
pub use error::AuthError;
pub use guard::{AccessGuard, AuthContext, GuardDecision, parse_bearer};
pub use password::{MAX_PASSWORD_BYTES, PasswordHasher};
pub use policy::{RouteId, RoutePolicyRegistry};
pub use principal::Principal;
pub use token::{Token, TokenCodec};
