use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use super::response::{message_only, ApiResponse, MessageResponse};
use crate::auth::StaffUser;
use crate::domain::catalog::{NewVariation, Variation, VariationOption, VariationUpdate};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VariationOptionDto {
    pub name: String,
    /// Price added on top of the product price.
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

impl From<VariationOptionDto> for VariationOption {
    fn from(o: VariationOptionDto) -> Self {
        Self {
            name: o.name,
            price: o.price,
        }
    }
}

impl From<VariationOption> for VariationOptionDto {
    fn from(o: VariationOption) -> Self {
        Self {
            name: o.name,
            price: o.price,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVariationRequest {
    pub product_id: Uuid,
    /// e.g. "size" or "spice level".
    pub variation_type: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub is_required: bool,
    pub options: Vec<VariationOptionDto>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVariationRequest {
    pub variation_type: Option<String>,
    pub is_default: Option<bool>,
    pub is_available: Option<bool>,
    pub is_required: Option<bool>,
    /// Replaces the whole option list when present.
    pub options: Option<Vec<VariationOptionDto>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariationResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub variation_type: String,
    pub is_default: bool,
    pub is_available: bool,
    pub is_required: bool,
    pub options: Vec<VariationOptionDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Variation> for VariationResponse {
    fn from(v: Variation) -> Self {
        Self {
            id: v.id,
            product_id: v.product_id,
            variation_type: v.variation_type,
            is_default: v.is_default,
            is_available: v.is_available,
            is_required: v.is_required,
            options: v.options.into_iter().map(VariationOptionDto::from).collect(),
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/variations",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Variations of the product", body = ApiResponse<Vec<VariationResponse>>),
        (status = 404, description = "Product not found", body = MessageResponse),
    ),
    tag = "variations"
)]
pub async fn list_product_variations(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let variations = blocking(move || state.variations.list_for_product(product_id)).await?;
    let data: Vec<VariationResponse> = variations.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Variations retrieved", data))
}

#[utoipa::path(
    get,
    path = "/api/v1/variations/{id}",
    params(("id" = Uuid, Path, description = "Variation id")),
    responses(
        (status = 200, description = "Variation found", body = ApiResponse<VariationResponse>),
        (status = 404, description = "Variation not found", body = MessageResponse),
    ),
    tag = "variations"
)]
pub async fn get_variation(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let variation = blocking(move || state.variations.get_variation(id)).await?;
    Ok(ApiResponse::ok("Variation retrieved", VariationResponse::from(variation)))
}

#[utoipa::path(
    post,
    path = "/api/v1/variations",
    request_body = CreateVariationRequest,
    responses(
        (status = 201, description = "Variation created", body = ApiResponse<VariationResponse>),
        (status = 400, description = "No options, negative price or unknown product", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "variations"
)]
pub async fn create_variation(
    state: web::Data<AppState>,
    _staff: StaffUser,
    body: web::Json<CreateVariationRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewVariation {
        product_id: body.product_id,
        variation_type: body.variation_type,
        is_default: body.is_default,
        is_available: body.is_available,
        is_required: body.is_required,
        options: body.options.into_iter().map(Into::into).collect(),
    };
    let variation = blocking(move || state.variations.create_variation(input)).await?;
    Ok(ApiResponse::created("Variation created", VariationResponse::from(variation)))
}

#[utoipa::path(
    put,
    path = "/api/v1/variations/{id}",
    params(("id" = Uuid, Path, description = "Variation id")),
    request_body = UpdateVariationRequest,
    responses(
        (status = 200, description = "Variation updated", body = ApiResponse<VariationResponse>),
        (status = 404, description = "Variation not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "variations"
)]
pub async fn update_variation(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateVariationRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let update = VariationUpdate {
        variation_type: body.variation_type,
        is_default: body.is_default,
        is_available: body.is_available,
        is_required: body.is_required,
        options: body
            .options
            .map(|options| options.into_iter().map(Into::into).collect()),
    };
    let variation = blocking(move || state.variations.update_variation(id, update)).await?;
    Ok(ApiResponse::ok("Variation updated", VariationResponse::from(variation)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/variations/{id}",
    params(("id" = Uuid, Path, description = "Variation id")),
    responses(
        (status = 200, description = "Variation deleted", body = MessageResponse),
        (status = 404, description = "Variation not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "variations"
)]
pub async fn delete_variation(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.variations.delete_variation(id)).await?;
    Ok(message_only("Variation deleted"))
}
