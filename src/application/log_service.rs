use crate::domain::activity::{LogFilter, LogRecord};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::LogRepository;

/// Read side of the activity log. Entries are never edited or removed.
pub struct LogService<L> {
    repo: L,
}

impl<L: LogRepository> LogService<L> {
    pub fn new(repo: L) -> Self {
        Self { repo }
    }

    pub fn list_logs(
        &self,
        filter: &LogFilter,
        page: PageRequest,
    ) -> Result<ListResult<LogRecord>, DomainError> {
        self.repo.list(filter, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::activity::DbActivityLogger;
    use crate::application::test_support::InMemoryLogs;
    use crate::domain::activity::{ActivityEvent, ActivityLogger, LogLevel};

    #[test]
    fn filters_by_level_and_source() {
        let logs = InMemoryLogs::default();
        let writer = DbActivityLogger::new(logs.clone(), "test", "resto_service");
        writer.record(ActivityEvent::info("order_service", "order.created"));
        writer.record(ActivityEvent::warn("user_service", "login.failed"));
        writer.record(ActivityEvent::info("user_service", "login.succeeded"));

        let service = LogService::new(logs);

        let warnings = service
            .list_logs(
                &LogFilter {
                    level: Some(LogLevel::Warn),
                    source: None,
                },
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(warnings.total, 1);
        assert_eq!(warnings.items[0].action, "login.failed");

        let users = service
            .list_logs(
                &LogFilter {
                    level: None,
                    source: Some("user_service".to_string()),
                },
                PageRequest::new(Some(1), Some(1)),
            )
            .unwrap();
        assert_eq!(users.total, 2);
        assert_eq!(users.items.len(), 1);
    }
}
