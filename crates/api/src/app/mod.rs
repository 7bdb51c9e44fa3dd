//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: credential store, verifier, token codec
//! - `routes/`: HTTP routes + handlers, and their route policy
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::Router;

use gatehouse_auth::{AccessGuard, AuthConfig, AuthError, Clock, RoutePolicyRegistry, SystemClock};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(auth: &AuthConfig) -> Result<Router, AuthError> {
    build_app_with_clock(auth, Arc::new(SystemClock))
}

/// Same as [`build_app`], reading token time from `clock`.
pub fn build_app_with_clock(auth: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Router, AuthError> {
    let services = Arc::new(services::AppServices::in_memory(auth, clock)?);

    let mut policy = RoutePolicyRegistry::new();
    let router = routes::router(&mut policy);
    for route in policy.public_routes() {
        tracing::debug!(%route, "public route");
    }

    // Frozen from here on: the guard only ever reads it.
    let guard = Arc::new(AccessGuard::new(Arc::new(policy), services.codec.clone()));
    let auth_state = middleware::AuthState { guard };

    Ok(router
        .layer(axum::Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        )))
}
