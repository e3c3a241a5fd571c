use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::response::{message_only, ApiResponse, MessageResponse};
use super::{blocking, parse_tag, PageParams};
use crate::auth::StaffUser;
use crate::domain::qr_code::{NewQrCode, QrCode, QrType};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQrCodeRequest {
    pub store_id: String,
    pub table_number: String,
    /// `table` (default) or `takeaway`.
    pub qr_type: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Location of a rendered image, if one was uploaded.
    pub image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QrCodeResponse {
    pub id: Uuid,
    pub code: String,
    pub store_id: String,
    pub table_number: String,
    pub qr_type: String,
    pub target_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<QrCode> for QrCodeResponse {
    fn from(q: QrCode) -> Self {
        Self {
            id: q.id,
            code: q.code,
            store_id: q.store_id,
            table_number: q.table_number,
            qr_type: q.qr_type.to_string(),
            target_url: q.target_url,
            expires_at: q.expires_at,
            image: q.image,
            created_at: q.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/qrcodes",
    request_body = CreateQrCodeRequest,
    responses(
        (status = 201, description = "QR code created", body = ApiResponse<QrCodeResponse>),
        (status = 400, description = "Missing table or expiry in the past", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "qrcodes"
)]
pub async fn create_qr_code(
    state: web::Data<AppState>,
    _staff: StaffUser,
    body: web::Json<CreateQrCodeRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewQrCode {
        store_id: body.store_id,
        table_number: body.table_number,
        qr_type: match body.qr_type.as_deref() {
            Some(raw) => parse_tag::<QrType>(raw)?,
            None => QrType::Table,
        },
        expires_at: body.expires_at,
        image: body.image,
    };
    let qr = blocking(move || state.qr_codes.create_qr_code(input)).await?;
    Ok(ApiResponse::created("QR code created", QrCodeResponse::from(qr)))
}

#[utoipa::path(
    get,
    path = "/api/v1/qrcodes",
    params(PageParams),
    responses((status = 200, description = "QR codes, newest first", body = ApiResponse<Vec<QrCodeResponse>>)),
    security(("bearer_auth" = [])),
    tag = "qrcodes"
)]
pub async fn list_qr_codes(
    state: web::Data<AppState>,
    _staff: StaffUser,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = query.to_request();
    let result = blocking(move || state.qr_codes.list_qr_codes(page)).await?;
    Ok(ApiResponse::paginated(
        "QR codes retrieved",
        result.map(QrCodeResponse::from),
        page,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/qrcodes/{id}",
    params(("id" = Uuid, Path, description = "QR code id")),
    responses(
        (status = 200, description = "QR code found", body = ApiResponse<QrCodeResponse>),
        (status = 404, description = "QR code not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "qrcodes"
)]
pub async fn get_qr_code(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let qr = blocking(move || state.qr_codes.get_qr_code(id)).await?;
    Ok(ApiResponse::ok("QR code retrieved", QrCodeResponse::from(qr)))
}

/// Resolves a scanned code to its store and table.
#[utoipa::path(
    get,
    path = "/api/v1/qrcodes/code/{code}",
    params(("code" = String, Path, description = "Scanned code")),
    responses(
        (status = 200, description = "Code is valid", body = ApiResponse<QrCodeResponse>),
        (status = 400, description = "Code has expired", body = MessageResponse),
        (status = 404, description = "Unknown code", body = MessageResponse),
    ),
    tag = "qrcodes"
)]
pub async fn resolve_qr_code(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();
    let qr = blocking(move || state.qr_codes.resolve(&code)).await?;
    Ok(ApiResponse::ok("QR code resolved", QrCodeResponse::from(qr)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/qrcodes/{id}",
    params(("id" = Uuid, Path, description = "QR code id")),
    responses(
        (status = 200, description = "QR code deleted", body = MessageResponse),
        (status = 404, description = "QR code not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "qrcodes"
)]
pub async fn delete_qr_code(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.qr_codes.delete_qr_code(id)).await?;
    Ok(message_only("QR code deleted"))
}
