use std::sync::Arc;

use axum::{
    extract::{MatchedPath, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use gatehouse_auth::{AccessGuard, GuardDecision, RouteId};

use crate::app::errors::unauthorized;

#[derive(Debug, Clone)]
pub struct AuthState {
    pub guard: Arc<AccessGuard>,
}

/// Default-deny gate in front of every route.
///
/// Authorized requests get an `AuthContext` extension; rejected requests are
/// answered here with a uniform 401 and never reach a handler.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| RouteId::new(req.method().as_str(), path.as_str()));

    // A non-UTF-8 header is treated the same as an absent one.
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match state.guard.check(route.as_ref(), authorization) {
        GuardDecision::Authorized(context) => {
            req.extensions_mut().insert(context);
            next.run(req).await
        }
        GuardDecision::Rejected(err) => {
            tracing::warn!(
                method = %req.method(),
                path = %req.uri().path(),
                reason = err.kind(),
                "request rejected"
            );
            unauthorized()
        }
    }
}
