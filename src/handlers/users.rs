use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::response::{message_only, ApiResponse, MessageResponse};
use super::{blocking, PageParams};
use crate::auth::AdminUser;
use crate::domain::access::{NewUser, User, UserUpdate, UserWithRole};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// At least 8 characters. Stored bcrypt-hashed.
    pub password: String,
    #[serde(default)]
    pub is_staff: bool,
    pub role_id: Option<Uuid>,
}

/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub role_id: Option<Uuid>,
}

/// A user as exposed over the API. The password hash never leaves the service.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_staff: bool,
    pub role_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            is_staff: u.is_staff,
            role_id: u.role_id,
            role: None,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl From<UserWithRole> for UserResponse {
    fn from(u: UserWithRole) -> Self {
        Self {
            role: u.role.map(|r| r.name),
            ..Self::from(u.user)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PageParams),
    responses(
        (status = 200, description = "Users", body = ApiResponse<Vec<UserResponse>>),
        (status = 403, description = "Administrators only", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    state: web::Data<AppState>,
    _admin: AdminUser,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = query.to_request();
    let result = blocking(move || state.users.list_users(page)).await?;
    Ok(ApiResponse::paginated(
        "Users retrieved",
        result.map(UserResponse::from),
        page,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let user = blocking(move || state.users.get_user(id)).await?;
    Ok(ApiResponse::ok("User retrieved", UserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid email, password or role", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewUser {
        name: body.name,
        email: body.email,
        password: body.password,
        is_staff: body.is_staff,
        role_id: body.role_id,
    };
    let user = blocking(move || state.users.create_user(input)).await?;
    Ok(ApiResponse::created("User created", UserResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 409, description = "Email already registered", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let update = UserUpdate {
        name: body.name,
        email: body.email,
        password: body.password,
        is_staff: body.is_staff,
        role_id: body.role_id,
    };
    let user = blocking(move || state.users.update_user(id, update)).await?;
    Ok(ApiResponse::ok("User updated", UserResponse::from(user)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.users.delete_user(id)).await?;
    Ok(message_only("User deleted"))
}
