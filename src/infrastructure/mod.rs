pub mod activity_log;
pub mod category_repo;
pub mod invoice_repo;
pub mod order_repo;
pub mod payment_repo;
pub mod product_repo;
pub mod qr_code_repo;
pub mod role_repo;
pub mod theme_repo;
pub mod user_repo;
pub mod variation_repo;

#[cfg(test)]
pub(crate) mod test_support;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

pub use activity_log::DieselLogRepository;
pub use category_repo::DieselCategoryRepository;
pub use invoice_repo::DieselInvoiceRepository;
pub use order_repo::DieselOrderRepository;
pub use payment_repo::DieselPaymentRepository;
pub use product_repo::DieselProductRepository;
pub use qr_code_repo::DieselQrCodeRepository;
pub use role_repo::{DieselPermissionRepository, DieselRoleRepository};
pub use theme_repo::DieselThemeRepository;
pub use user_repo::DieselUserRepository;
pub use variation_repo::DieselVariationRepository;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => DomainError::NotFound("Record".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                log::warn!("unique violation: {}", info.message());
                DomainError::Conflict("Record already exists".to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                DomainError::InvalidInput(info.message().to_string())
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Wraps a failed insert. Dangling references stay client errors; anything
/// else is reported as an insert failure.
pub(crate) fn insert_failed(what: &str, e: DieselError) -> DomainError {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DomainError::InvalidInput(format!(
                "{} references a row that does not exist ({})",
                what,
                info.message()
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            log::warn!("unique violation on {} insert: {}", what, info.message());
            DomainError::Conflict(format!("{} already exists", what))
        }
        other => DomainError::InsertFailed(format!("{}: {}", what, other)),
    }
}
