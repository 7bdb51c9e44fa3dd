use serde::{Deserialize, Serialize};

use gatehouse_auth::Principal;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub login: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl core::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("login", &self.login)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub msg: &'static str,
    pub id: String,
}

/// The caller's identity as seen by downstream handlers.
#[derive(Debug, Serialize)]
pub struct PrincipalDto {
    pub id: String,
    pub login: String,
    pub email: String,
}

impl From<Principal> for PrincipalDto {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id.to_string(),
            login: principal.login,
            email: principal.email,
        }
    }
}
