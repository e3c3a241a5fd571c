use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::response::{ApiResponse, MessageResponse};
use super::{blocking, parse_tag, PageParams};
use crate::auth::AdminUser;
use crate::domain::activity::{LogFilter, LogLevel, LogRecord};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct LogResponse {
    pub id: Uuid,
    pub level: String,
    pub source: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub environment: String,
    pub application: String,
    pub created_at: DateTime<Utc>,
}

impl From<LogRecord> for LogResponse {
    fn from(r: LogRecord) -> Self {
        Self {
            id: r.id,
            level: r.level.to_string(),
            source: r.source,
            action: r.action,
            entity: r.entity,
            entity_id: r.entity_id,
            metadata: r.metadata,
            environment: r.environment,
            application: r.application,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LogQuery {
    /// `debug`, `info`, `warn` or `error`.
    pub level: Option<String>,
    /// Emitting component, e.g. `order_service`.
    pub source: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Activity log, newest first", body = ApiResponse<Vec<LogResponse>>),
        (status = 400, description = "Unknown level", body = MessageResponse),
        (status = 403, description = "Administrators only", body = MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "logs"
)]
pub async fn list_logs(
    state: web::Data<AppState>,
    _admin: AdminUser,
    query: web::Query<LogQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let page = PageParams {
        page: query.page,
        per_page: query.per_page,
    }
    .to_request();
    let filter = LogFilter {
        level: query.level.as_deref().map(parse_tag::<LogLevel>).transpose()?,
        source: query.source,
    };

    let result = blocking(move || state.logs.list_logs(&filter, page)).await?;
    Ok(ApiResponse::paginated(
        "Logs retrieved",
        result.map(LogResponse::from),
        page,
    ))
}
