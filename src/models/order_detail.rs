use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::order::{NewOrderDetail, OrderDetail};
use crate::schema::order_details;

use super::order::OrderRow;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_details)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderDetailRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_details)]
pub struct NewOrderDetailRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Option<Uuid>,
    pub variation_id: Option<Uuid>,
    pub product_name: String,
    pub variation_name: Option<String>,
    pub unit_price: BigDecimal,
    pub quantity: i32,
    pub total_price: BigDecimal,
}

impl NewOrderDetailRow {
    pub fn stamped(order_id: Uuid, detail: NewOrderDetail) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id: detail.product_id,
            variation_id: detail.variation_id,
            product_name: detail.product_name,
            variation_name: detail.variation_name,
            unit_price: detail.unit_price,
            quantity: detail.quantity,
            total_price: detail.total_price,
        }
    }
}

impl From<OrderDetailRow> for OrderDetail {
    fn from(row: OrderDetailRow) -> Self {
        OrderDetail {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            variation_id: row.variation_id,
            product_name: row.product_name,
            variation_name: row.variation_name,
            unit_price: row.unit_price,
            quantity: row.quantity,
            total_price: row.total_price,
            created_at: row.created_at,
        }
    }
}
