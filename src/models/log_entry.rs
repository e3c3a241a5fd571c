use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::activity::LogRecord;
use crate::domain::errors::DomainError;
use crate::schema::logs;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LogRow {
    pub id: Uuid,
    pub level: String,
    pub source: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub metadata: Value,
    pub environment: String,
    pub application: String,
    pub created_at: DateTime<Utc>,
}

impl From<&LogRecord> for LogRow {
    fn from(r: &LogRecord) -> Self {
        Self {
            id: r.id,
            level: r.level.to_string(),
            source: r.source.clone(),
            action: r.action.clone(),
            entity: r.entity.clone(),
            entity_id: r.entity_id.clone(),
            metadata: r.metadata.clone(),
            environment: r.environment.clone(),
            application: r.application.clone(),
            created_at: r.created_at,
        }
    }
}

impl TryFrom<LogRow> for LogRecord {
    type Error = DomainError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        Ok(LogRecord {
            id: row.id,
            level: row.level.parse()?,
            source: row.source,
            action: row.action,
            entity: row.entity,
            entity_id: row.entity_id,
            metadata: row.metadata,
            environment: row.environment,
            application: row.application,
            created_at: row.created_at,
        })
    }
}
