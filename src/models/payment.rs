use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::payment::Payment;
use crate::schema::payments;

use super::order::OrderRow;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = payments)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PaymentRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub method: String,
    pub amount: BigDecimal,
    pub status: String,
    pub transaction_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = payments, treat_none_as_null = true)]
pub struct PaymentChangeset {
    pub method: String,
    pub amount: BigDecimal,
    pub status: String,
    pub transaction_ref: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id,
            order_id: p.order_id,
            method: p.method.to_string(),
            amount: p.amount.clone(),
            status: p.status.to_string(),
            transaction_ref: p.transaction_ref.clone(),
            paid_at: p.paid_at,
            created_at: p.created_at,
        }
    }
}

impl From<&Payment> for PaymentChangeset {
    fn from(p: &Payment) -> Self {
        Self {
            method: p.method.to_string(),
            amount: p.amount.clone(),
            status: p.status.to_string(),
            transaction_ref: p.transaction_ref.clone(),
            paid_at: p.paid_at,
        }
    }
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: row.id,
            order_id: row.order_id,
            method: row.method.parse()?,
            amount: row.amount,
            status: row.status.parse()?,
            transaction_ref: row.transaction_ref,
            paid_at: row.paid_at,
            created_at: row.created_at,
        })
    }
}
