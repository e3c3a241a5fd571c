use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::qr_code::QrCode;
use crate::schema::qr_codes;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = qr_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QrCodeRow {
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

impl From<&QrCode> for QrCodeRow {
    fn from(q: &QrCode) -> Self {
        Self {
            id: q.id,
            code: q.code.clone(),
            store_id: q.store_id.clone(),
            table_number: q.table_number.clone(),
            qr_type: q.qr_type.to_string(),
            target_url: q.target_url.clone(),
            expires_at: q.expires_at,
            image: q.image.clone(),
            created_at: q.created_at,
        }
    }
}

impl TryFrom<QrCodeRow> for QrCode {
    type Error = DomainError;

    fn try_from(row: QrCodeRow) -> Result<Self, Self::Error> {
        Ok(QrCode {
            id: row.id,
            qr_type: row.qr_type.parse()?,
            code: row.code,
            store_id: row.store_id,
            table_number: row.table_number,
            target_url: row.target_url,
            expires_at: row.expires_at,
            image: row.image,
            created_at: row.created_at,
        })
    }
}
