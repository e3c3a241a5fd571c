use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::schema::orders;

use super::qr_code::QrCodeRow;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = orders)]
#[diesel(belongs_to(QrCodeRow, foreign_key = qr_code_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    pub status: String,
    pub dish_status: String,
    pub total_amount: BigDecimal,
    pub qr_code_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    pub status: String,
    pub dish_status: String,
    pub total_amount: BigDecimal,
    pub qr_code_id: Option<Uuid>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders, treat_none_as_null = true)]
pub struct OrderChangeset {
    pub customer_name: String,
    pub customer_phone: String,
    pub table_number: String,
    pub notes: Option<String>,
    pub status: String,
    pub dish_status: String,
    pub total_amount: BigDecimal,
    pub qr_code_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderChangeset {
    fn from(o: &Order) -> Self {
        Self {
            customer_name: o.customer_name.clone(),
            customer_phone: o.customer_phone.clone(),
            table_number: o.table_number.clone(),
            notes: o.notes.clone(),
            status: o.status.to_string(),
            dish_status: o.dish_status.to_string(),
            total_amount: o.total_amount.clone(),
            qr_code_id: o.qr_code_id,
            updated_at: o.updated_at,
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            status: row.status.parse()?,
            dish_status: row.dish_status.parse()?,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            table_number: row.table_number,
            notes: row.notes,
            total_amount: row.total_amount,
            qr_code_id: row.qr_code_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
