use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;

use gatehouse_infra::{register_account, NewAccount};

use crate::app::dto::{RegisterRequest, RegisterResponse};
use crate::app::errors::{json_error, registration_error_to_response};
use crate::app::services::AppServices;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text());
        }
    };

    let account = NewAccount {
        login: req.login,
        email: req.email,
        password: SecretString::from(req.password),
        confirm_password: SecretString::from(req.confirm_password),
    };

    match register_account(&services.accounts, services.hasher, account).await {
        Ok(principal) => {
            tracing::info!(user_id = %principal.id, login = %principal.login, "account registered");
            (
                StatusCode::CREATED,
                Json(RegisterResponse {
                    msg: "Your account was successfully created",
                    id: principal.id.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => registration_error_to_response(err),
    }
}
