use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub order_id: Uuid,
    /// Customer snapshot taken when the invoice was issued.
    pub customer: Value,
    /// Line items snapshot taken when the invoice was issued.
    pub items: Value,
    pub total: BigDecimal,
    pub invoice_number: String,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `INV-<yyyymmdd>-<8 upper-hex chars>`.
pub fn invoice_number(issued_at: DateTime<Utc>, id: Uuid) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("INV-{}-{}", issued_at.format("%Y%m%d"), &simple[..8])
}
