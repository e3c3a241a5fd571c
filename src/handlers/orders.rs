use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::invoices::InvoiceResponse;
use super::payments::PaymentResponse;
use super::response::{message_only, ApiResponse, MessageResponse};
use super::{blocking, parse_tag, PageParams};
use crate::auth::StaffUser;
use crate::domain::order::{
    DishStatus, NewOrder, NewOrderDetail, Order, OrderDetailView, OrderFilter, OrderStatus,
    OrderView,
};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderItemRequest {
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
    /// Name as shown to the customer when the order was placed.
    pub product_name: String,
    pub variation_name: Option<String>,
    pub quantity: i32,
    /// Decimal price as a string, e.g. "9.99".
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
    #[schema(value_type = String)]
    pub total_price: BigDecimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    #[schema(value_type = String)]
    pub total_amount: BigDecimal,
    /// The QR code the order was placed through, if any.
    pub qr_code_id: Option<Uuid>,
    pub items: Vec<CreateOrderItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    /// One of `pending`, `paid`, `cancelled`.
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDishStatusRequest {
    /// One of `pending`, `preparing`, `ready`, `served`.
    pub dish_status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    pub status: String,
    pub dish_status: String,
    #[schema(value_type = String)]
    pub total_amount: BigDecimal,
    pub qr_code_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_name: o.customer_name,
            customer_phone: o.customer_phone,
            table_number: o.table_number,
            notes: o.notes,
            status: o.status.to_string(),
            dish_status: o.dish_status.to_string(),
            total_amount: o.total_amount,
            qr_code_id: o.qr_code_id,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VariationSummary {
    pub id: Uuid,
    pub variation_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
    pub product_name: String,
    pub variation_name: Option<String>,
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub total_price: BigDecimal,
    /// Current catalog entry, if it still exists.
    pub product: Option<ProductSummary>,
    pub variation: Option<VariationSummary>,
}

impl From<OrderDetailView> for OrderItemResponse {
    fn from(view: OrderDetailView) -> Self {
        let d = view.detail;
        Self {
            id: d.id,
            product_id: d.product_id,
            variation_id: d.variation_id,
            product_name: d.product_name,
            variation_name: d.variation_name,
            unit_price: d.unit_price,
            quantity: d.quantity,
            total_price: d.total_price,
            product: view.product.map(|p| ProductSummary {
                id: p.id,
                name: p.name,
                price: p.price,
            }),
            variation: view.variation.map(|v| VariationSummary {
                id: v.id,
                variation_type: v.variation_type,
            }),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailsResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub payments: Vec<PaymentResponse>,
    pub invoice: Option<InvoiceResponse>,
}

impl From<OrderView> for OrderDetailsResponse {
    fn from(view: OrderView) -> Self {
        Self {
            order: view.order.into(),
            items: view.details.into_iter().map(Into::into).collect(),
            payments: view.payments.into_iter().map(Into::into).collect(),
            invoice: view.invoice.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderQuery {
    /// Filter by order status.
    pub status: Option<String>,
    pub table_number: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// Creates an order together with its items. The order and every item are
/// written in one transaction: either all rows exist afterwards or none do.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderDetailsResponse>),
        (status = 400, description = "Invalid order or dangling product reference", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse),
    ),
    tag = "orders"
)]
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let order = NewOrder {
        customer_name: body.customer_name,
        customer_phone: body.customer_phone,
        table_number: body.table_number,
        notes: body.notes,
        total_amount: body.total_amount,
        qr_code_id: body.qr_code_id,
    };
    let details: Vec<NewOrderDetail> = body
        .items
        .into_iter()
        .map(|i| NewOrderDetail {
            product_id: i.product_id,
            variation_id: i.variation_id,
            product_name: i.product_name,
            variation_name: i.variation_name,
            unit_price: i.unit_price,
            quantity: i.quantity,
            total_price: i.total_price,
        })
        .collect();

    let view = blocking(move || state.orders.create_order(order, details)).await?;
    Ok(ApiResponse::created("Order created", OrderDetailsResponse::from(view)))
}

/// Returns the order with its items, payments and invoice.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = ApiResponse<OrderDetailsResponse>),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let view = blocking(move || state.orders.get_order(id)).await?;
    Ok(ApiResponse::ok("Order retrieved", OrderDetailsResponse::from(view)))
}

/// Returns a page of orders (without their items), newest first.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    params(OrderQuery),
    responses(
        (status = 200, description = "Paginated list of orders", body = ApiResponse<Vec<OrderResponse>>),
        (status = 400, description = "Unknown status filter", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    _staff: StaffUser,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .to_request();
    let filter = OrderFilter {
        status: query.status.as_deref().map(parse_tag::<OrderStatus>).transpose()?,
        table_number: query.table_number,
    };

    let result = blocking(move || state.orders.list_orders(&filter, page)).await?;
    Ok(ApiResponse::paginated(
        "Orders retrieved",
        result.map(OrderResponse::from),
        page,
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/status",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Unknown status", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
        (status = 409, description = "Transition not allowed", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status: OrderStatus = parse_tag(&body.status)?;
    let order = blocking(move || state.orders.update_status(id, status)).await?;
    Ok(ApiResponse::ok("Order status updated", OrderResponse::from(order)))
}

#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/dish-status",
    params(("id" = Uuid, Path, description = "Order id")),
    request_body = UpdateDishStatusRequest,
    responses(
        (status = 200, description = "Dish status changed", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Unknown dish status", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn update_dish_status(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDishStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let dish_status: DishStatus = parse_tag(&body.dish_status)?;
    let order = blocking(move || state.orders.update_dish_status(id, dish_status)).await?;
    Ok(ApiResponse::ok("Dish status updated", OrderResponse::from(order)))
}

/// Deletes the order; its items, payments and invoice go with it.
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn delete_order(
    state: web::Data<AppState>,
    _staff: StaffUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    blocking(move || state.orders.delete_order(id)).await?;
    Ok(message_only("Order deleted"))
}
