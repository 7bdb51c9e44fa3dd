use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use gatehouse_auth::AuthError;
use gatehouse_core::DomainError;
use gatehouse_infra::RegistrationError;

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// The one response every guard rejection gets, whatever the cause.
pub fn unauthorized() -> Response {
    let mut response = json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized");
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
    response
}

/// Map a login failure. Token kinds never reach here; they are guard-only.
pub fn login_error_to_response(err: AuthError) -> Response {
    match err {
        AuthError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            err.to_string(),
        ),
        AuthError::CredentialStore(_) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "store_unavailable",
            "credential store unavailable, try again later",
        ),
        other => {
            tracing::error!(error = %other, "login failed unexpectedly");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

pub fn registration_error_to_response(err: RegistrationError) -> Response {
    match err {
        RegistrationError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        RegistrationError::Domain(DomainError::Conflict(msg)) => json_error(StatusCode::CONFLICT, "conflict", msg),
        RegistrationError::Domain(other) => json_error(StatusCode::BAD_REQUEST, "validation_error", other.to_string()),
        RegistrationError::Auth(other) => {
            tracing::error!(error = %other, "registration failed unexpectedly");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}
