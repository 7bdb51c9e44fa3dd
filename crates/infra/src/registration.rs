//! Account registration: input checks, hashing, uniqueness-checked insert.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use validator::ValidateEmail;

use gatehouse_auth::{AuthError, MAX_PASSWORD_BYTES, PasswordHasher, Principal};
use gatehouse_core::DomainError;

use crate::credential_store::InMemoryCredentialStore;

/// Registration request. Passwords stay wrapped until hashed.
#[derive(Debug)]
pub struct NewAccount {
    pub login: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Register a new account and return its principal.
///
/// Email is trimmed and lower-cased; login is trimmed and otherwise kept as given.
pub async fn register_account(
    store: &InMemoryCredentialStore,
    hasher: PasswordHasher,
    account: NewAccount,
) -> Result<Principal, RegistrationError> {
    let login = account.login.trim().to_string();
    let email = account.email.trim().to_lowercase();

    if login.is_empty() {
        return Err(DomainError::validation("login cannot be empty").into());
    }
    if !email.validate_email() {
        return Err(DomainError::validation("invalid email format").into());
    }
    if account.password.expose_secret().is_empty() {
        return Err(DomainError::validation("password cannot be empty").into());
    }
    if account.password.expose_secret().len() > MAX_PASSWORD_BYTES {
        return Err(DomainError::validation(format!(
            "password cannot be longer than {MAX_PASSWORD_BYTES} bytes"
        ))
        .into());
    }

    // Cheap pre-checks so obvious conflicts skip the bcrypt work.
    // The authoritative check happens again under the write lock.
    if store.login_exists(&login) {
        return Err(DomainError::conflict("this login is already in use").into());
    }
    if store.email_exists(&email) {
        return Err(DomainError::conflict("this email is already in use").into());
    }
    if account.password.expose_secret() != account.confirm_password.expose_secret() {
        return Err(DomainError::validation("passwords are not the same").into());
    }

    let password = account.password;
    let digest = tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))??;

    let record = store.insert(&login, &email, digest)?;
    Ok(Principal::from(record))
}
