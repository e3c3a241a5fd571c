use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

use super::response::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub service: &'static str,
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = ApiResponse<HealthResponse>)),
    tag = "health"
)]
pub async fn health() -> HttpResponse {
    ApiResponse::ok(
        "OK",
        HealthResponse {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};

    use super::*;

    #[actix_web::test]
    async fn health_returns_envelope() {
        let app = test::init_service(App::new().route("/health", web::get().to(health))).await;

        let resp: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
                .await;

        assert_eq!(resp["status"], 200);
        assert_eq!(resp["message"], "OK");
        assert_eq!(resp["data"]["service"], "resto_service");
    }
}
