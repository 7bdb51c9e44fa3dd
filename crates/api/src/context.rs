use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Response,
};

use gatehouse_auth::{AuthContext, Principal};

use crate::app::errors::unauthorized;

/// The authenticated caller of the current request.
///
/// Extracting this on a public route (where the guard attaches no principal)
/// rejects with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .and_then(|context| context.principal().cloned())
            .map(CurrentUser)
            .ok_or_else(unauthorized)
    }
}
