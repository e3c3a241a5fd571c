use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::blocking;
use super::response::{ApiResponse, MessageResponse};
use super::users::UserResponse;
use crate::auth::{AuthUser, JwtKeys};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub user: UserResponse,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid email or password", body = MessageResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    keys: web::Data<JwtKeys>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = body.into_inner();
    let account = blocking(move || state.users.authenticate(&email, &password)).await?;

    let role = account.role.as_ref().map(|r| r.name.as_str());
    let token = keys
        .issue(&account.user, role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            token,
            user: account.into(),
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "The authenticated user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Missing, invalid or expired token", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(state: web::Data<AppState>, user: AuthUser) -> Result<HttpResponse, AppError> {
    let id = user.0.sub;
    let account = blocking(move || state.users.get_user(id)).await?;
    Ok(ApiResponse::ok("Current user", UserResponse::from(account)))
}
