//! Infrastructure adapters: credential storage and account registration.

pub mod credential_store;
pub mod registration;

pub use credential_store::InMemoryCredentialStore;
pub use registration::{NewAccount, RegistrationError, register_account};
