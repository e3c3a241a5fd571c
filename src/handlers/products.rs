use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::response::{message_only, ApiResponse, MessageResponse};
use super::variations::VariationResponse;
use super::{blocking, PageParams};
use crate::auth::StaffUser;
use crate::domain::catalog::{NewProduct, Product, ProductUpdate, ProductWithVariations};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// Decimal string, e.g. "12.50".
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub position: i32,
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<BigDecimal>,
    pub is_available: Option<bool>,
    pub position: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub is_available: bool,
    pub position: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variations: Option<Vec<VariationResponse>>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            category_id: p.category_id,
            name: p.name,
            description: p.description,
            price: p.price,
            is_available: p.is_available,
            position: p.position,
            image_url: p.image_url,
            created_at: p.created_at,
            updated_at: p.updated_at,
            variations: None,
        }
    }
}

impl From<ProductWithVariations> for ProductResponse {
    fn from(p: ProductWithVariations) -> Self {
        let variations = p.variations.into_iter().map(VariationResponse::from).collect();
        Self {
            variations: Some(variations),
            ..Self::from(p.product)
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Only products of this category.
    pub category_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products ordered by position", body = ApiResponse<Vec<ProductResponse>>),
    ),
    tag = "products"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .to_request();
    let category_id = query.category_id;

    let result = blocking(move || state.products.list_products(category_id, page)).await?;
    Ok(ApiResponse::paginated(
        "Products retrieved",
        result.map(ProductResponse::from),
        page,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found", body = MessageResponse),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product = blocking(move || state.products.get_product(id)).await?;
    Ok(ApiResponse::ok("Product retrieved", ProductResponse::from(product)))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid input or unknown category", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = MessageResponse),
        (status = 403, description = "Staff only", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    _staff: StaffUser,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewProduct {
        category_id: body.category_id,
        name: body.name,
        description: body.description,
        price: body.price,
        is_available: body.is_available,
        position: body.position,
        image_url: body.image_url,
    };
    let product = blocking(move || state.products.create_product(input)).await?;
    Ok(ApiResponse::created("Product created", ProductResponse::from(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Invalid input", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let update = ProductUpdate {
        category_id: body.category_id,
        name: body.name,
        description: body.description,
        price: body.price,
        is_available: body.is_available,
        position: body.position,
        image_url: body.image_url,
    };
    let product = blocking(move || state.products.update_product(id, update)).await?;
    Ok(ApiResponse::ok("Product updated", ProductResponse::from(product)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Product still has variations", body = MessageResponse),
        (status = 404, description = "Product not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.products.delete_product(id)).await?;
    Ok(message_only("Product deleted"))
}
