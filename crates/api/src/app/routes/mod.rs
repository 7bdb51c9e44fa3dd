use axum::{
    routing::{get, post},
    Router,
};

use gatehouse_auth::{RouteId, RoutePolicyRegistry};

pub mod auth;
pub mod system;
pub mod users;

/// All endpoints. Public ones are recorded in `policy` next to their route;
/// anything not marked there requires a bearer token.
pub fn router(policy: &mut RoutePolicyRegistry) -> Router {
    policy
        .mark_public(RouteId::get("/health"))
        .mark_public(RouteId::new("HEAD", "/health"))
        .mark_public(RouteId::post("/login"))
        .mark_public(RouteId::post("/users/register"));

    Router::new()
        .route("/health", get(system::health))
        .route("/login", post(auth::login))
        .route("/users/register", post(users::register))
        .route("/me", get(system::whoami))
        .route("/whoami", get(system::whoami))
        .fallback(system::not_found)
}
