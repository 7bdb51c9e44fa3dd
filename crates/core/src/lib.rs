//! `gatehouse-core`: shared identifiers and the domain error model.
//!
//! No IO, no HTTP, no crypto. Everything here is plain data.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::UserId;
