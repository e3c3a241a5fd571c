use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use uuid::Uuid;

use super::errors::DomainError;

pub const CODE_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrType {
    Table,
    Takeaway,
}

impl QrType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrType::Table => "table",
            QrType::Takeaway => "takeaway",
        }
    }
}

impl fmt::Display for QrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(QrType::Table),
            "takeaway" => Ok(QrType::Takeaway),
            other => Err(DomainError::invalid(format!("unknown qr code type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QrCode {
    pub id: Uuid,
    pub code: String,
    pub store_id: String,
    pub table_number: String,
    pub qr_type: QrType,
    pub target_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl QrCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Clone)]
pub struct NewQrCode {
    pub store_id: String,
    pub table_number: String,
    pub qr_type: QrType,
    pub expires_at: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// Random upper-case alphanumeric code.
pub fn generate_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}

pub fn target_url(public_base_url: &str, code: &str) -> String {
    format!("{}/order?code={}", public_base_url.trim_end_matches('/'), code)
}
