use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use gatehouse_auth::{CredentialRecord, CredentialStore, CredentialStoreError};
use gatehouse_core::{DomainError, DomainResult, UserId};

#[derive(Debug, Default)]
struct Accounts {
    by_login: HashMap<String, CredentialRecord>,
    // email -> login
    emails: HashMap<String, String>,
}

/// In-memory credential store for tests/dev.
///
/// Enforces global uniqueness of `login` and `email` under a single write lock.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Accounts>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account with an already-hashed password.
    pub fn insert(&self, login: &str, email: &str, password_hash: String) -> DomainResult<CredentialRecord> {
        let mut accounts = self.inner.write().unwrap_or_else(|e| e.into_inner());

        if accounts.by_login.contains_key(login) {
            return Err(DomainError::conflict("this login is already in use"));
        }
        if accounts.emails.contains_key(email) {
            return Err(DomainError::conflict("this email is already in use"));
        }

        let record = CredentialRecord {
            id: UserId::new(),
            login: login.to_string(),
            email: email.to_string(),
            password_hash,
        };
        accounts.emails.insert(email.to_string(), login.to_string());
        accounts.by_login.insert(login.to_string(), record.clone());

        tracing::info!(user_id = %record.id, login, "account created");
        Ok(record)
    }

    pub fn login_exists(&self, login: &str) -> bool {
        self.inner
            .read()
            .map(|accounts| accounts.by_login.contains_key(login))
            .unwrap_or(false)
    }

    pub fn email_exists(&self, email: &str) -> bool {
        self.inner
            .read()
            .map(|accounts| accounts.emails.contains_key(email))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|accounts| accounts.by_login.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        let accounts = self
            .inner
            .read()
            .map_err(|_| CredentialStoreError::Unavailable("credential store lock poisoned".to_string()))?;
        Ok(accounts.by_login.get(login).cloned())
    }
}
