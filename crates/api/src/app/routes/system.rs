use axum::{http::StatusCode, response::Response, Json};

use crate::app::dto::PrincipalDto;
use crate::app::errors::json_error;
use crate::context::CurrentUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(CurrentUser(principal): CurrentUser) -> Json<PrincipalDto> {
    Json(PrincipalDto::from(principal))
}

pub async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "no such route")
}
