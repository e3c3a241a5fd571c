use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use super::response::{message_only, ApiResponse, MessageResponse};
use crate::auth::AdminUser;
use crate::domain::access::Permission;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePermissionRequest {
    /// `<action>:<resource>`, e.g. `read:orders`.
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Permission> for PermissionResponse {
    fn from(p: Permission) -> Self {
        Self {
            id: p.id,
            name: p.name,
            created_at: p.created_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/permissions",
    responses((status = 200, description = "Permissions", body = ApiResponse<Vec<PermissionResponse>>)),
    security(("bearer_auth" = [])),
    tag = "permissions"
)]
pub async fn list_permissions(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let permissions = blocking(move || state.roles.list_permissions()).await?;
    let data: Vec<PermissionResponse> = permissions.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Permissions retrieved", data))
}

#[utoipa::path(
    post,
    path = "/api/v1/permissions",
    request_body = CreatePermissionRequest,
    responses(
        (status = 201, description = "Permission created", body = ApiResponse<PermissionResponse>),
        (status = 400, description = "Malformed permission name", body = MessageResponse),
        (status = 409, description = "Permission already exists", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "permissions"
)]
pub async fn create_permission(
    state: web::Data<AppState>,
    _admin: AdminUser,
    body: web::Json<CreatePermissionRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let permission = blocking(move || state.roles.create_permission(&name)).await?;
    Ok(ApiResponse::created("Permission created", PermissionResponse::from(permission)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/permissions/{id}",
    params(("id" = Uuid, Path, description = "Permission id")),
    responses(
        (status = 200, description = "Permission deleted", body = MessageResponse),
        (status = 404, description = "Permission not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "permissions"
)]
pub async fn delete_permission(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.roles.delete_permission(id)).await?;
    Ok(message_only("Permission deleted"))
}
