use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::QrCodeRepository;
use crate::domain::qr_code::{generate_code, target_url, NewQrCode, QrCode};

const SOURCE: &str = "qr_code_service";
const CODE_ATTEMPTS: usize = 5;

pub struct QrCodeService<Q> {
    repo: Q,
    public_base_url: String,
    activity: Arc<dyn ActivityLogger>,
}

impl<Q: QrCodeRepository> QrCodeService<Q> {
    pub fn new(repo: Q, public_base_url: &str, activity: Arc<dyn ActivityLogger>) -> Self {
        Self {
            repo,
            public_base_url: public_base_url.to_string(),
            activity,
        }
    }

    fn fresh_code(&self) -> Result<String, DomainError> {
        for _ in 0..CODE_ATTEMPTS {
            let code = generate_code();
            if self.repo.find_by_code(&code)?.is_none() {
                return Ok(code);
            }
        }
        Err(DomainError::Internal(
            "could not generate a unique qr code".to_string(),
        ))
    }

    pub fn create_qr_code(&self, input: NewQrCode) -> Result<QrCode, DomainError> {
        let store_id = input.store_id.trim().to_string();
        let table_number = input.table_number.trim().to_string();
        if store_id.is_empty() {
            return Err(DomainError::invalid("store_id is required"));
        }
        if table_number.is_empty() {
            return Err(DomainError::invalid("table_number is required"));
        }

        let now = Utc::now();
        if input.expires_at.is_some_and(|at| at <= now) {
            return Err(DomainError::invalid("expires_at must be in the future"));
        }

        let code = self.fresh_code()?;
        let qr = self.repo.create(&QrCode {
            id: Uuid::new_v4(),
            target_url: target_url(&self.public_base_url, &code),
            code,
            store_id,
            table_number,
            qr_type: input.qr_type,
            expires_at: input.expires_at,
            image: input.image,
            created_at: now,
        })?;

        self.activity
            .record(ActivityEvent::info(SOURCE, "qr_code.created").on("qr_code", qr.id));
        Ok(qr)
    }

    pub fn get_qr_code(&self, id: Uuid) -> Result<QrCode, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| DomainError::not_found("QR code", id))
    }

    /// Looks a scanned code up; expired codes are rejected.
    pub fn resolve(&self, code: &str) -> Result<QrCode, DomainError> {
        let qr = self
            .repo
            .find_by_code(code.trim())?
            .ok_or_else(|| DomainError::not_found("QR code", code))?;
        if qr.is_expired(Utc::now()) {
            return Err(DomainError::invalid(format!("qr code {} has expired", qr.code)));
        }
        Ok(qr)
    }

    pub fn list_qr_codes(&self, page: PageRequest) -> Result<ListResult<QrCode>, DomainError> {
        self.repo.list(page)
    }

    pub fn delete_qr_code(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::not_found("QR code", id));
        }
        self.activity
            .record(ActivityEvent::info(SOURCE, "qr_code.deleted").on("qr_code", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::application::test_support::{InMemoryQrCodes, RecordingLogger};
    use crate::domain::qr_code::QrType;

    fn service() -> (QrCodeService<InMemoryQrCodes>, InMemoryQrCodes) {
        let repo = InMemoryQrCodes::default();
        let service = QrCodeService::new(
            repo.clone(),
            "https://menu.example.com/",
            Arc::new(RecordingLogger::default()),
        );
        (service, repo)
    }

    fn input() -> NewQrCode {
        NewQrCode {
            store_id: "lisbon-1".to_string(),
            table_number: "9".to_string(),
            qr_type: QrType::Table,
            expires_at: None,
            image: None,
        }
    }

    #[test]
    fn created_code_resolves_to_its_target() {
        let (service, _) = service();
        let qr = service.create_qr_code(input()).unwrap();

        assert_eq!(
            qr.target_url,
            format!("https://menu.example.com/order?code={}", qr.code)
        );
        assert_eq!(service.resolve(&qr.code).unwrap().id, qr.id);
    }

    #[test]
    fn expired_code_does_not_resolve() {
        let (service, repo) = service();
        let qr = service.create_qr_code(input()).unwrap();
        let mut stale = qr.clone();
        stale.expires_at = Some(Utc::now() - Duration::minutes(5));
        repo.delete(qr.id).unwrap();
        repo.create(&stale).unwrap();

        assert!(matches!(
            service.resolve(&qr.code),
            Err(DomainError::InvalidInput(msg)) if msg.contains("expired")
        ));
        assert!(matches!(service.resolve("NOPE"), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn past_expiry_is_rejected_at_creation() {
        let (service, _) = service();
        let mut past = input();
        past.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(matches!(
            service.create_qr_code(past),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
