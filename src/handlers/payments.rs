use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::response::{ApiResponse, MessageResponse};
use super::{blocking, parse_tag};
use crate::auth::StaffUser;
use crate::domain::payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub order_id: Uuid,
    /// One of `cash`, `card`, `transfer`, `e_wallet`.
    pub method: String,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    /// Defaults to `pending`.
    pub status: Option<String>,
    pub transaction_ref: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    /// One of `pending`, `success`, `failed`.
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub method: String,
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub status: String,
    pub transaction_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            method: p.method.to_string(),
            amount: p.amount,
            status: p.status.to_string(),
            transaction_ref: p.transaction_ref,
            paid_at: p.paid_at,
            created_at: p.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Invalid amount, method or status", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn create_payment(
    state: web::Data<AppState>,
    _staff: StaffUser,
    body: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = NewPayment {
        order_id: body.order_id,
        method: parse_tag::<PaymentMethod>(&body.method)?,
        amount: body.amount,
        status: match body.status.as_deref() {
            Some(raw) => parse_tag::<PaymentStatus>(raw)?,
            None => PaymentStatus::Pending,
        },
        transaction_ref: body.transaction_ref,
    };
    let payment = blocking(move || state.payments.record_payment(input)).await?;
    Ok(ApiResponse::created("Payment recorded", PaymentResponse::from(payment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Payment found", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Payment not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn get_payment(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payment = blocking(move || state.payments.get_payment(id)).await?;
    Ok(ApiResponse::ok("Payment retrieved", PaymentResponse::from(payment)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/payments",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Payment attempts for the order", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn list_order_payments(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let payments = blocking(move || state.payments.list_for_order(order_id)).await?;
    let data: Vec<PaymentResponse> = payments.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok("Payments retrieved", data))
}

#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}/status",
    params(("id" = Uuid, Path, description = "Payment id")),
    request_body = UpdatePaymentStatusRequest,
    responses(
        (status = 200, description = "Payment status updated", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Unknown status", body = MessageResponse),
        (status = 404, description = "Payment not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "payments"
)]
pub async fn update_payment_status(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePaymentStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status: PaymentStatus = parse_tag(&body.status)?;
    let payment = blocking(move || state.payments.update_status(id, status)).await?;
    Ok(ApiResponse::ok("Payment status updated", PaymentResponse::from(payment)))
}
