use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::errors::{json_error, login_error_to_response};
use crate::app::services::AppServices;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text());
        }
    };

    // Registration stores the login trimmed.
    let login = req.login.trim();
    if login.is_empty() || req.password.is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "login and password are required",
        );
    }

    let password = SecretString::from(req.password);
    let principal = match services.verifier.verify(login, &password).await {
        Ok(principal) => principal,
        Err(err) => return login_error_to_response(err),
    };

    match services.codec.issue(&principal) {
        Ok(token) => {
            tracing::info!(user_id = %principal.id, "login succeeded");
            (
                StatusCode::OK,
                Json(LoginResponse {
                    access_token: token.into_string(),
                }),
            )
                .into_response()
        }
        Err(err) => login_error_to_response(err),
    }
}
