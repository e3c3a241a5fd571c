use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resto Service API",
        version = "1.0.0",
        description = r#"
Restaurant ordering backend: menu catalog, customer orders, payments,
invoices, staff accounts, table QR codes and storefront themes.

Staff and admin routes expect `Authorization: Bearer <token>` obtained from
`POST /api/v1/auth/login`.

Every response uses the same envelope:

```json
{ "message": "Orders retrieved", "status": 200, "data": [], "meta": { "page": 1, "per_page": 20, "total_count": 0 } }
```
"#
    ),
    servers((url = "http://localhost:8080", description = "Local development")),
    tags(
        (name = "auth", description = "Login and current user"),
        (name = "users", description = "Staff accounts"),
        (name = "roles", description = "Roles and their permissions"),
        (name = "permissions", description = "Permission catalog"),
        (name = "categories", description = "Menu categories"),
        (name = "products", description = "Menu items"),
        (name = "variations", description = "Product option groups"),
        (name = "orders", description = "Customer orders"),
        (name = "payments", description = "Payment attempts"),
        (name = "invoices", description = "Order invoices"),
        (name = "qrcodes", description = "Table QR codes"),
        (name = "themes", description = "Storefront themes"),
        (name = "logs", description = "Activity log"),
        (name = "health", description = "Liveness"),
    ),
    paths(
        handlers::health::health,

        handlers::auth::login,
        handlers::auth::me,

        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        handlers::roles::list_roles,
        handlers::roles::get_role,
        handlers::roles::create_role,
        handlers::roles::update_role,
        handlers::roles::delete_role,
        handlers::roles::set_role_permissions,

        handlers::permissions::list_permissions,
        handlers::permissions::create_permission,
        handlers::permissions::delete_permission,

        handlers::categories::list_categories,
        handlers::categories::get_category,
        handlers::categories::create_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        handlers::variations::list_product_variations,
        handlers::variations::get_variation,
        handlers::variations::create_variation,
        handlers::variations::update_variation,
        handlers::variations::delete_variation,

        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::orders::update_order_status,
        handlers::orders::update_dish_status,
        handlers::orders::delete_order,

        handlers::payments::create_payment,
        handlers::payments::get_payment,
        handlers::payments::list_order_payments,
        handlers::payments::update_payment_status,

        handlers::invoices::issue_invoice,
        handlers::invoices::get_order_invoice,
        handlers::invoices::get_invoice,

        handlers::qr_codes::create_qr_code,
        handlers::qr_codes::list_qr_codes,
        handlers::qr_codes::get_qr_code,
        handlers::qr_codes::resolve_qr_code,
        handlers::qr_codes::delete_qr_code,

        handlers::themes::active_theme,
        handlers::themes::list_themes,
        handlers::themes::get_theme,
        handlers::themes::create_theme,
        handlers::themes::update_theme,
        handlers::themes::delete_theme,

        handlers::logs::list_logs,
    ),
    components(
        schemas(
            handlers::response::MessageResponse,
            handlers::response::PageMeta,

            handlers::auth::LoginRequest,
            handlers::auth::LoginResponse,
            handlers::users::CreateUserRequest,
            handlers::users::UpdateUserRequest,
            handlers::users::UserResponse,
            handlers::roles::RoleRequest,
            handlers::roles::SetPermissionsRequest,
            handlers::roles::RoleResponse,
            handlers::permissions::CreatePermissionRequest,
            handlers::permissions::PermissionResponse,

            handlers::categories::CreateCategoryRequest,
            handlers::categories::UpdateCategoryRequest,
            handlers::categories::CategoryResponse,
            handlers::products::CreateProductRequest,
            handlers::products::UpdateProductRequest,
            handlers::products::ProductResponse,
            handlers::variations::VariationOptionDto,
            handlers::variations::CreateVariationRequest,
            handlers::variations::UpdateVariationRequest,
            handlers::variations::VariationResponse,

            handlers::orders::CreateOrderItemRequest,
            handlers::orders::CreateOrderRequest,
            handlers::orders::UpdateOrderStatusRequest,
            handlers::orders::UpdateDishStatusRequest,
            handlers::orders::OrderResponse,
            handlers::orders::OrderItemResponse,
            handlers::orders::OrderDetailsResponse,
            handlers::payments::CreatePaymentRequest,
            handlers::payments::UpdatePaymentStatusRequest,
            handlers::payments::PaymentResponse,
            handlers::invoices::IssueInvoiceRequest,
            handlers::invoices::InvoiceResponse,

            handlers::qr_codes::CreateQrCodeRequest,
            handlers::qr_codes::QrCodeResponse,
            handlers::themes::CreateThemeRequest,
            handlers::themes::UpdateThemeRequest,
            handlers::themes::ThemeResponse,
            handlers::logs::LogResponse,
            handlers::health::HealthResponse,
        )
    ),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/health",
            "/api/v1/auth/login",
            "/api/v1/orders/{id}/status",
            "/api/v1/orders/{id}/invoice",
            "/api/v1/qrcodes/code/{code}",
            "/api/v1/themes/active",
            "/api/v1/logs",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
