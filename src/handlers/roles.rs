use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use super::permissions::PermissionResponse;
use super::response::{message_only, ApiResponse, MessageResponse};
use crate::auth::AdminUser;
use crate::domain::access::{Role, RoleWithPermissions};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RoleRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPermissionsRequest {
    /// The complete new permission set.
    pub permission_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<PermissionResponse>>,
}

impl From<Role> for RoleResponse {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
            permissions: None,
        }
    }
}

impl From<RoleWithPermissions> for RoleResponse {
    fn from(r: RoleWithPermissions) -> Self {
        Self {
            permissions: Some(r.permissions.into_iter().map(Into::into).collect()),
            ..Self::from(r.role)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/roles",
    responses((status = 200, description = "Roles", body = ApiResponse<Vec<RoleResponse>>)),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn list_roles(
    state: web::Data<AppState>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let roles = blocking(move || state.roles.list_roles()).await?;
    let data: Vec<RoleResponse> = roles.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Roles retrieved", data))
}

#[utoipa::path(
    get,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role with its permissions", body = ApiResponse<RoleResponse>),
        (status = 404, description = "Role not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn get_role(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let role = blocking(move || state.roles.get_role(id)).await?;
    Ok(ApiResponse::ok("Role retrieved", RoleResponse::from(role)))
}

#[utoipa::path(
    post,
    path = "/api/v1/roles",
    request_body = RoleRequest,
    responses(
        (status = 201, description = "Role created", body = ApiResponse<RoleResponse>),
        (status = 409, description = "Role name taken", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn create_role(
    state: web::Data<AppState>,
    _admin: AdminUser,
    body: web::Json<RoleRequest>,
) -> Result<HttpResponse, AppError> {
    let name = body.into_inner().name;
    let role = blocking(move || state.roles.create_role(&name)).await?;
    Ok(ApiResponse::created("Role created", RoleResponse::from(role)))
}

#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role id")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Role renamed", body = ApiResponse<RoleResponse>),
        (status = 404, description = "Role not found", body = MessageResponse),
        (status = 409, description = "Role name taken", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn update_role(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<RoleRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let name = body.into_inner().name;
    let role = blocking(move || state.roles.rename_role(id, &name)).await?;
    Ok(ApiResponse::ok("Role updated", RoleResponse::from(role)))
}

/// Users holding the role keep their accounts but lose the role.
#[utoipa::path(
    delete,
    path = "/api/v1/roles/{id}",
    params(("id" = Uuid, Path, description = "Role id")),
    responses(
        (status = 200, description = "Role deleted", body = MessageResponse),
        (status = 404, description = "Role not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn delete_role(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.roles.delete_role(id)).await?;
    Ok(message_only("Role deleted"))
}

#[utoipa::path(
    put,
    path = "/api/v1/roles/{id}/permissions",
    params(("id" = Uuid, Path, description = "Role id")),
    request_body = SetPermissionsRequest,
    responses(
        (status = 200, description = "Permission set replaced", body = ApiResponse<RoleResponse>),
        (status = 404, description = "Role or permission not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn set_role_permissions(
    state: web::Data<AppState>,
    _admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<SetPermissionsRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let ids = body.into_inner().permission_ids;
    let role = blocking(move || state.roles.set_permissions(id, &ids)).await?;
    Ok(ApiResponse::ok("Role permissions updated", RoleResponse::from(role)))
}
