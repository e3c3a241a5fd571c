use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use super::response::{message_only, ApiResponse, MessageResponse};
use crate::auth::StaffUser;
use crate::domain::theme::{NewTheme, Theme, ThemeUpdate};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateThemeRequest {
    pub name: String,
    /// `#rgb` or `#rrggbb`.
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateThemeRequest {
    pub name: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ThemeResponse {
    pub id: Uuid,
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: Option<String>,
    pub logo_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Theme> for ThemeResponse {
    fn from(t: Theme) -> Self {
        Self {
            id: t.id,
            name: t.name,
            primary_color: t.primary_color,
            secondary_color: t.secondary_color,
            font_family: t.font_family,
            logo_url: t.logo_url,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/themes/active",
    responses(
        (status = 200, description = "Theme the customer menu should use", body = ApiResponse<ThemeResponse>),
        (status = 404, description = "No active theme", body = MessageResponse),
    ),
    tag = "themes"
)]
pub async fn active_theme(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let theme = blocking(move || state.themes.active_theme()).await?;
    Ok(ApiResponse::ok("Active theme retrieved", ThemeResponse::from(theme)))
}

#[utoipa::path(
    get,
    path = "/api/v1/themes",
    responses((status = 200, description = "Themes", body = ApiResponse<Vec<ThemeResponse>>)),
    security(("bearer_auth" = [])),
    tag = "themes"
)]
pub async fn list_themes(
    state: web::Data<AppState>,
    _staff: StaffUser,
) -> Result<HttpResponse, AppError> {
    let themes = blocking(move || state.themes.list_themes()).await?;
    let data: Vec<ThemeResponse> = themes.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Themes retrieved", data))
}

#[utoipa::path(
    get,
    path = "/api/v1/themes/{id}",
    params(("id" = Uuid, Path, description = "Theme id")),
    responses(
        (status = 200, description = "Theme found", body = ApiResponse<ThemeResponse>),
        (status = 404, description = "Theme not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "themes"
)]
pub async fn get_theme(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let theme = blocking(move || state.themes.get_theme(id)).await?;
    Ok(ApiResponse::ok("Theme retrieved", ThemeResponse::from(theme)))
}

#[utoipa::path(
    post,
    path = "/api/v1/themes",
    request_body = CreateThemeRequest,
    responses(
        (status = 201, description = "Theme created", body = ApiResponse<ThemeResponse>),
        (status = 400, description = "Invalid colors", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "themes"
)]
pub async fn create_theme(
    state: web::Data<AppState>,
    _staff: StaffUser,
    body: web::Json<CreateThemeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewTheme {
        name: body.name,
        primary_color: body.primary_color,
        secondary_color: body.secondary_color,
        font_family: body.font_family,
        logo_url: body.logo_url,
        is_active: body.is_active,
    };
    let theme = blocking(move || state.themes.create_theme(input)).await?;
    Ok(ApiResponse::created("Theme created", ThemeResponse::from(theme)))
}

/// Also used to (de)activate a theme via `is_active`.
#[utoipa::path(
    put,
    path = "/api/v1/themes/{id}",
    params(("id" = Uuid, Path, description = "Theme id")),
    request_body = UpdateThemeRequest,
    responses(
        (status = 200, description = "Theme updated", body = ApiResponse<ThemeResponse>),
        (status = 404, description = "Theme not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "themes"
)]
pub async fn update_theme(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateThemeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let update = ThemeUpdate {
        name: body.name,
        primary_color: body.primary_color,
        secondary_color: body.secondary_color,
        font_family: body.font_family,
        logo_url: body.logo_url,
        is_active: body.is_active,
    };
    let theme = blocking(move || state.themes.update_theme(id, update)).await?;
    Ok(ApiResponse::ok("Theme updated", ThemeResponse::from(theme)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/themes/{id}",
    params(("id" = Uuid, Path, description = "Theme id")),
    responses(
        (status = 200, description = "Theme deleted", body = MessageResponse),
        (status = 404, description = "Theme not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "themes"
)]
pub async fn delete_theme(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.themes.delete_theme(id)).await?;
    Ok(message_only("Theme deleted"))
}
