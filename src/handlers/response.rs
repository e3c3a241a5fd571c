use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::pagination::{ListResult, PageRequest};

/// Envelope shared by every endpoint. `status` repeats the HTTP status code.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
}

/// The envelope without `data` or `meta`; used for errors and bare acknowledgements.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    pub status: u16,
}

impl MessageResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    fn with(status: StatusCode, message: &str, data: T, meta: Option<PageMeta>) -> HttpResponse {
        HttpResponse::build(status).json(ApiResponse {
            message: message.to_string(),
            status: status.as_u16(),
            data: Some(data),
            meta,
        })
    }

    pub fn ok(message: &str, data: T) -> HttpResponse {
        Self::with(StatusCode::OK, message, data, None)
    }

    pub fn created(message: &str, data: T) -> HttpResponse {
        Self::with(StatusCode::CREATED, message, data, None)
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn paginated(message: &str, result: ListResult<T>, page: PageRequest) -> HttpResponse {
        let meta = PageMeta {
            page: page.page,
            per_page: page.per_page,
            total_count: result.total,
        };
        Self::with(StatusCode::OK, message, result.items, Some(meta))
    }
}

/// 200 envelope carrying only a message, e.g. after a delete.
pub fn message_only(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new(StatusCode::OK, message))
}
