pub mod auth;
pub mod categories;
pub mod health;
pub mod invoices;
pub mod logs;
pub mod orders;
pub mod payments;
pub mod permissions;
pub mod products;
pub mod qr_codes;
pub mod response;
pub mod roles;
pub mod themes;
pub mod users;
pub mod variations;

use actix_web::web;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::errors::DomainError;
use crate::domain::pagination::PageRequest;
use crate::errors::AppError;

/// Runs synchronous service code on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

/// Parses a lower-case tag such as a status or method from a request body.
pub(crate) fn parse_tag<T>(raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(AppError::from)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// Page number (1-based). Defaults to 1.
    pub page: Option<i64>,
    /// Items per page. Defaults to 20, maximum 100.
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
