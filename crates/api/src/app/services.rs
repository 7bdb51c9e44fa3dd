use std::sync::Arc;

use gatehouse_auth::{
    AuthConfig, AuthError, Clock, CredentialStore, CredentialVerifier, PasswordHasher, TokenCodec,
};
use gatehouse_infra::InMemoryCredentialStore;

/// Everything the handlers need, built once per process.
#[derive(Debug)]
pub struct AppServices {
    pub accounts: Arc<InMemoryCredentialStore>,
    pub verifier: CredentialVerifier<Arc<dyn CredentialStore>>,
    pub codec: Arc<TokenCodec>,
    pub hasher: PasswordHasher,
}

impl AppServices {
    pub fn in_memory(auth: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AuthError> {
        let accounts = Arc::new(InMemoryCredentialStore::new());
        let hasher = PasswordHasher::new();
        let store: Arc<dyn CredentialStore> = accounts.clone();

        Ok(Self {
            verifier: CredentialVerifier::new(store, hasher)?,
            codec: Arc::new(TokenCodec::new(auth, clock)),
            accounts,
            hasher,
        })
    }
}
