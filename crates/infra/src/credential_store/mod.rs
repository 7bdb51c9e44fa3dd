//! Credential store adapters.
//!
//! Only an in-memory store exists; persistence schema is owned elsewhere.

pub mod in_memory;

pub use in_memory::InMemoryCredentialStore;
