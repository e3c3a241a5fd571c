use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::invoice::Invoice;
use crate::schema::invoices;

use super::order::OrderRow;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable)]
#[diesel(table_name = invoices)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvoiceRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub customer: Value,
    pub items: Value,
    pub total: BigDecimal,
    pub invoice_number: String,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Invoice> for InvoiceRow {
    fn from(i: &Invoice) -> Self {
        Self {
            id: i.id,
            order_id: i.order_id,
            customer: i.customer.clone(),
            items: i.items.clone(),
            total: i.total.clone(),
            invoice_number: i.invoice_number.clone(),
            pdf_url: i.pdf_url.clone(),
            created_at: i.created_at,
        }
    }
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            order_id: row.order_id,
            customer: row.customer,
            items: row.items,
            total: row.total,
            invoice_number: row.invoice_number,
            pdf_url: row.pdf_url,
            created_at: row.created_at,
        }
    }
}
