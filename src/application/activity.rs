use chrono::Utc;
use uuid::Uuid;

use crate::domain::activity::{ActivityEvent, ActivityLogger, LogRecord};
use crate::domain::ports::LogRepository;

/// Persists activity events to the log table and mirrors them through the
/// `log` facade. Storage failures are reported and swallowed.
pub struct DbActivityLogger<L> {
    repo: L,
    environment: String,
    application: String,
}

impl<L: LogRepository> DbActivityLogger<L> {
    pub fn new(repo: L, environment: &str, application: &str) -> Self {
        Self {
            repo,
            environment: environment.to_string(),
            application: application.to_string(),
        }
    }
}

impl<L: LogRepository> ActivityLogger for DbActivityLogger<L> {
    fn record(&self, event: ActivityEvent) {
        log::log!(
            log::Level::from(event.level),
            "[{}] {} {}",
            event.source,
            event.action,
            event.entity_id.as_deref().unwrap_or("-")
        );

        let record = LogRecord {
            id: Uuid::new_v4(),
            level: event.level,
            source: event.source,
            action: event.action,
            entity: event.entity,
            entity_id: event.entity_id,
            metadata: event.metadata,
            environment: self.environment.clone(),
            application: self.application.clone(),
            created_at: Utc::now(),
        };

        if let Err(e) = self.repo.append(&record) {
            log::warn!("failed to persist activity log '{}': {}", record.action, e);
        }
    }
}
