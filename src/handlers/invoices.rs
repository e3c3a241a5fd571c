use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::blocking;
use super::response::{ApiResponse, MessageResponse};
use crate::auth::StaffUser;
use crate::domain::invoice::Invoice;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IssueInvoiceRequest {
    /// Location of an already uploaded PDF rendition.
    pub pdf_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub invoice_number: String,
    #[schema(value_type = Object)]
    pub customer: serde_json::Value,
    #[schema(value_type = Vec<Object>)]
    pub items: serde_json::Value,
    #[schema(value_type = String)]
    pub total: BigDecimal,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            order_id: i.order_id,
            invoice_number: i.invoice_number,
            customer: i.customer,
            items: i.items,
            total: i.total,
            pdf_url: i.pdf_url,
            created_at: i.created_at,
        }
    }
}

/// Issues the order's invoice from a snapshot of its customer and items.
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/invoice",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = IssueInvoiceRequest,
    responses(
        (status = 201, description = "Invoice issued", body = ApiResponse<InvoiceResponse>),
        (status = 404, description = "Order not found", body = MessageResponse),
        (status = 409, description = "Order already invoiced", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn issue_invoice(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: Option<web::Json<IssueInvoiceRequest>>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let pdf_url = body.and_then(|b| b.into_inner().pdf_url);
    let invoice = blocking(move || state.invoices.issue_invoice(order_id, pdf_url)).await?;
    Ok(ApiResponse::created("Invoice issued", InvoiceResponse::from(invoice)))
}

#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/invoice",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Invoice of the order", body = ApiResponse<InvoiceResponse>),
        (status = 404, description = "Order has no invoice", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn get_order_invoice(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let invoice = blocking(move || state.invoices.get_for_order(order_id)).await?;
    Ok(ApiResponse::ok("Invoice retrieved", InvoiceResponse::from(invoice)))
}

#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice found", body = ApiResponse<InvoiceResponse>),
        (status = 404, description = "Invoice not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "invoices"
)]
pub async fn get_invoice(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let invoice = blocking(move || state.invoices.get_invoice(id)).await?;
    Ok(ApiResponse::ok("Invoice retrieved", InvoiceResponse::from(invoice)))
}
