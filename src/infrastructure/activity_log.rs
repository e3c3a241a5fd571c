use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::activity::{LogFilter, LogRecord};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{ListResult, PageRequest};
use crate::domain::ports::LogRepository;
use crate::models::log_entry::LogRow;
use crate::schema::logs;

pub struct DieselLogRepository {
    pool: DbPool,
}

impl DieselLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl LogRepository for DieselLogRepository {
    fn append(&self, record: &LogRecord) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(logs::table)
            .values(&LogRow::from(record))
            .execute(&mut conn)?;

        Ok(())
    }

    fn list(&self, filter: &LogFilter, page: PageRequest) -> Result<ListResult<LogRecord>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut count_query = logs::table.into_boxed();
            let mut rows_query = logs::table.select(LogRow::as_select()).into_boxed();

            if let Some(level) = filter.level {
                count_query = count_query.filter(logs::level.eq(level.as_str()));
                rows_query = rows_query.filter(logs::level.eq(level.as_str()));
            }
            if let Some(source) = &filter.source {
                count_query = count_query.filter(logs::source.eq(source.clone()));
                rows_query = rows_query.filter(logs::source.eq(source.clone()));
            }

            let total: i64 = count_query.count().get_result(conn)?;
            let rows = rows_query
                .order(logs::created_at.desc())
                .limit(page.per_page)
                .offset(page.offset())
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(LogRecord::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
                total,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::DieselLogRepository;
    use crate::domain::activity::{LogFilter, LogLevel, LogRecord};
    use crate::domain::pagination::PageRequest;
    use crate::domain::ports::LogRepository;
    use crate::infrastructure::test_support::setup_db;

    fn record(level: LogLevel, source: &str) -> LogRecord {
        LogRecord {
            id: Uuid::new_v4(),
            level,
            source: source.to_string(),
            action: "something.happened".to_string(),
            entity: None,
            entity_id: None,
            metadata: json!({}),
            environment: "test".to_string(),
            application: "resto_service".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn list_filters_on_level_and_source() {
        let (_container, pool) = setup_db().await;
        let repo = DieselLogRepository::new(pool);

        repo.append(&record(LogLevel::Info, "order_service")).unwrap();
        repo.append(&record(LogLevel::Warn, "order_service")).unwrap();
        repo.append(&record(LogLevel::Info, "user_service")).unwrap();

        let all = repo.list(&LogFilter::default(), PageRequest::default()).unwrap();
        assert_eq!(all.total, 3);

        let warnings = repo
            .list(
                &LogFilter {
                    level: Some(LogLevel::Warn),
                    source: None,
                },
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(warnings.total, 1);

        let orders_info = repo
            .list(
                &LogFilter {
                    level: Some(LogLevel::Info),
                    source: Some("order_service".to_string()),
                },
                PageRequest::default(),
            )
            .unwrap();
        assert_eq!(orders_info.total, 1);
        assert_eq!(orders_info.items[0].source, "order_service");
    }
}
