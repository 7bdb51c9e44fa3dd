//! Credential lookup contract and login verification.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use gatehouse_core::UserId;

use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::principal::Principal;

/// Stored credential for one account, as handed over by the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub password_hash: String,
}

impl core::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

impl From<CredentialRecord> for Principal {
    fn from(record: CredentialRecord) -> Self {
        Principal {
            id: record.id,
            login: record.login,
            email: record.email,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialStoreError {
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the account store, as far as authentication is concerned.
///
/// `login` and `email` uniqueness is the store's job.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<CredentialRecord>, CredentialStoreError>;
}

#[async_trait]
impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    async fn find_by_login(&self, login: &str) -> Result<Option<CredentialRecord>, CredentialStoreError> {
        (**self).find_by_login(login).await
    }
}

/// Verifies a login/password pair and yields a sanitized [`Principal`].
pub struct CredentialVerifier<S> {
    store: S,
    hasher: PasswordHasher,
    // Checked against when the login is unknown, so both failure paths pay
    // for one bcrypt verification.
    decoy_digest: String,
}

impl<S> core::fmt::Debug for CredentialVerifier<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl<S: CredentialStore> CredentialVerifier<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Result<Self, AuthError> {
        let decoy_digest = hasher.hash("gatehouse-decoy-password")?;
        Ok(Self {
            store,
            hasher,
            decoy_digest,
        })
    }

    /// Verify `password` for `login`.
    ///
    /// Unknown login and wrong password both yield
    /// [`AuthError::InvalidCredentials`]. Store failures surface as
    /// [`AuthError::CredentialStore`].
    pub async fn verify(&self, login: &str, password: &SecretString) -> Result<Principal, AuthError> {
        let record = self.store.find_by_login(login).await.map_err(|e| {
            tracing::error!(error = %e, "credential lookup failed");
            AuthError::CredentialStore(e.to_string())
        })?;

        let digest = match &record {
            Some(record) => record.password_hash.clone(),
            None => self.decoy_digest.clone(),
        };

        let hasher = self.hasher;
        let plaintext = SecretString::from(password.expose_secret().to_owned());
        let matches = tokio::task::spawn_blocking(move || hasher.verify(plaintext.expose_secret(), &digest))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        match record {
            Some(record) if matches => {
                tracing::debug!(user_id = %record.id, "credentials verified");
                Ok(Principal::from(record))
            }
            _ => {
                tracing::debug!(login_len = login.len(), "credentials rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct MapStore {
        records: HashMap<String, CredentialRecord>,
    }

    impl MapStore {
        fn with_user(login: &str, email: &str, password: &str) -> Self {
            let record = CredentialRecord {
                id: UserId::new(),
                login: login.to_string(),
                email: email.to_string(),
                password_hash: PasswordHasher::new().hash(password).unwrap(),
            };
            let mut records = HashMap::new();
            records.insert(login.to_string(), record);
            Self { records }
        }
    }

    #[async_trait]
    impl CredentialStore for MapStore {
        async fn find_by_login(&self, login: &str) -> Result<Option<CredentialRecord>, CredentialStoreError> {
            Ok(self.records.get(login).cloned())
        }
    }

    struct DownStore;

    #[async_trait]
    impl CredentialStore for DownStore {
        async fn find_by_login(&self, _login: &str) -> Result<Option<CredentialRecord>, CredentialStoreError> {
            Err(CredentialStoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn correct_password_yields_principal() {
        let store = MapStore::with_user("alice", "alice@example.com", "s3cret");
        let expected_id = store.records["alice"].id;
        let verifier = CredentialVerifier::new(store, PasswordHasher::new()).unwrap();

        let principal = verifier.verify("alice", &secret("s3cret")).await.unwrap();
        assert_eq!(principal.id, expected_id);
        assert_eq!(principal.login, "alice");
        assert_eq!(principal.email, "alice@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_login_look_the_same() {
        let store = MapStore::with_user("alice", "alice@example.com", "s3cret");
        let verifier = CredentialVerifier::new(store, PasswordHasher::new()).unwrap();

        let wrong_password = verifier.verify("alice", &secret("nope")).await.unwrap_err();
        let unknown_login = verifier.verify("mallory", &secret("s3cret")).await.unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_login, wrong_password);
        assert_eq!(unknown_login.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn corrupt_stored_digest_never_verifies() {
        let mut store = MapStore::with_user("bob", "bob@example.com", "pw");
        store.records.get_mut("bob").unwrap().password_hash = "garbage".to_string();
        let verifier = CredentialVerifier::new(store, PasswordHasher::new()).unwrap();

        let err = verifier.verify("bob", &secret("pw")).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn store_failure_is_not_invalid_credentials() {
        let verifier = CredentialVerifier::new(DownStore, PasswordHasher::new()).unwrap();

        let err = verifier.verify("alice", &secret("s3cret")).await.unwrap_err();
        assert!(matches!(err, AuthError::CredentialStore(msg) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn works_through_a_shared_trait_object() {
        let store: Arc<dyn CredentialStore> = Arc::new(MapStore::with_user("carol", "carol@example.com", "pw"));
        let verifier = CredentialVerifier::new(store, PasswordHasher::new()).unwrap();

        assert!(verifier.verify("carol", &secret("pw")).await.is_ok());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_login_text_is_not_logged() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let store = MapStore::with_user("alice", "alice@example.com", "s3cret");
        let verifier = CredentialVerifier::new(store, PasswordHasher::new()).unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            runtime.block_on(async {
                let err = verifier
                    .verify("typed-my-password-here", &secret("s3cret"))
                    .await
                    .unwrap_err();
                assert_eq!(err, AuthError::InvalidCredentials);
            });
        });

        let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("credentials rejected"), "log output: {logged}");
        assert!(!logged.contains("typed-my-password-here"), "log output: {logged}");
    }

    #[test]
    fn record_debug_hides_digest() {
        let record = CredentialRecord {
            id: UserId::new(),
            login: "dave".to_string(),
            email: "dave@example.com".to_string(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuvwxyz".to_string(),
        };
        let rendered = format!("{record:?}");
        assert!(!rendered.contains("$2b$10$"));
        assert!(rendered.contains("dave"));
    }
}
