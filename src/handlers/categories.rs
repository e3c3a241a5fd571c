use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::products::ProductResponse;
use super::response::{message_only, ApiResponse, MessageResponse};
use super::{blocking, PageParams};
use crate::auth::StaffUser;
use crate::domain::catalog::{Category, CategoryUpdate, CategoryWithProducts, NewCategory};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub position: i32,
}

fn default_true() -> bool {
    true
}

/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub position: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present only when `preload=true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductResponse>>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            is_active: c.is_active,
            position: c.position,
            created_at: c.created_at,
            updated_at: c.updated_at,
            products: None,
        }
    }
}

impl From<CategoryWithProducts> for CategoryResponse {
    fn from(c: CategoryWithProducts) -> Self {
        let products = c.products.into_iter().map(ProductResponse::from).collect();
        Self {
            products: Some(products),
            ..Self::from(c.category)
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryQuery {
    /// Include products and their variations.
    #[serde(default)]
    pub preload: bool,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PreloadQuery {
    #[serde(default)]
    pub preload: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Categories ordered by position", body = ApiResponse<Vec<CategoryResponse>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    state: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .to_request();

    let result = if query.preload {
        blocking(move || state.categories.list_categories_with_products(page))
            .await?
            .map(CategoryResponse::from)
    } else {
        blocking(move || state.categories.list_categories(page))
            .await?
            .map(CategoryResponse::from)
    };

    Ok(ApiResponse::paginated("Categories retrieved", result, page))
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id"), PreloadQuery),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found", body = MessageResponse),
    ),
    tag = "categories"
)]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PreloadQuery>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let category: CategoryResponse = if query.preload {
        blocking(move || state.categories.get_category_with_products(id))
            .await?
            .into()
    } else {
        blocking(move || state.categories.get_category(id)).await?.into()
    };
    Ok(ApiResponse::ok("Category retrieved", category))
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid or duplicate name", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Staff only", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    _staff: StaffUser,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewCategory {
        name: body.name,
        is_active: body.is_active,
        position: body.position,
    };
    let category = blocking(move || state.categories.create_category(input)).await?;
    Ok(ApiResponse::created("Category created", CategoryResponse::from(category)))
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponse>),
        (status = 400, description = "Invalid or duplicate name", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn update_category(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let update = CategoryUpdate {
        name: body.name,
        is_active: body.is_active,
        position: body.position,
    };
    let category = blocking(move || state.categories.update_category(id, update)).await?;
    Ok(ApiResponse::ok("Category updated", CategoryResponse::from(category)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Category still has products", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.categories.delete_category(id)).await?;
    Ok(message_only("Category deleted"))
}
