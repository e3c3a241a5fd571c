pub mod application;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod openapi;
pub mod schema;
pub mod state;

use std::error::Error;
use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::handlers::{
    auth as auth_routes, categories, health, invoices, logs, orders, payments, permissions,
    products, qr_codes, roles, themes, users, variations,
};
use crate::state::AppState;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Registers every `/api/v1` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth_routes::login))
                    .route("/me", web::get().to(auth_routes::me)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("", web::post().to(users::create_user))
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}", web::put().to(users::update_user))
                    .route("/{id}", web::delete().to(users::delete_user)),
            )
            .service(
                web::scope("/roles")
                    .route("", web::get().to(roles::list_roles))
                    .route("", web::post().to(roles::create_role))
                    .route("/{id}", web::get().to(roles::get_role))
                    .route("/{id}", web::put().to(roles::update_role))
                    .route("/{id}", web::delete().to(roles::delete_role))
                    .route("/{id}/permissions", web::put().to(roles::set_role_permissions)),
            )
            .service(
                web::scope("/permissions")
                    .route("", web::get().to(permissions::list_permissions))
                    .route("", web::post().to(permissions::create_permission))
                    .route("/{id}", web::delete().to(permissions::delete_permission)),
            )
            .service(
                web::scope("/categories")
                    .route("", web::get().to(categories::list_categories))
                    .route("", web::post().to(categories::create_category))
                    .route("/{id}", web::get().to(categories::get_category))
                    .route("/{id}", web::put().to(categories::update_category))
                    .route("/{id}", web::delete().to(categories::delete_category)),
            )
            .service(
                web::scope("/products")
                    .route("", web::get().to(products::list_products))
                    .route("", web::post().to(products::create_product))
                    .route("/{id}", web::get().to(products::get_product))
                    .route("/{id}", web::put().to(products::update_product))
                    .route("/{id}", web::delete().to(products::delete_product))
                    .route(
                        "/{id}/variations",
                        web::get().to(variations::list_product_variations),
                    ),
            )
            .service(
                web::scope("/variations")
                    .route("", web::post().to(variations::create_variation))
                    .route("/{id}", web::get().to(variations::get_variation))
                    .route("/{id}", web::put().to(variations::update_variation))
                    .route("/{id}", web::delete().to(variations::delete_variation)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::post().to(orders::create_order))
                    .route("", web::get().to(orders::list_orders))
                    .route("/{id}", web::get().to(orders::get_order))
                    .route("/{id}", web::delete().to(orders::delete_order))
                    .route("/{id}/status", web::put().to(orders::update_order_status))
                    .route("/{id}/dish-status", web::put().to(orders::update_dish_status))
                    .route("/{id}/payments", web::get().to(payments::list_order_payments))
                    .route("/{id}/invoice", web::post().to(invoices::issue_invoice))
                    .route("/{id}/invoice", web::get().to(invoices::get_order_invoice)),
            )
            .service(
                web::scope("/payments")
                    .route("", web::post().to(payments::create_payment))
                    .route("/{id}", web::get().to(payments::get_payment))
                    .route("/{id}/status", web::put().to(payments::update_payment_status)),
            )
            .service(web::scope("/invoices").route("/{id}", web::get().to(invoices::get_invoice)))
            .service(
                web::scope("/qrcodes")
                    .route("", web::get().to(qr_codes::list_qr_codes))
                    .route("", web::post().to(qr_codes::create_qr_code))
                    .route("/code/{code}", web::get().to(qr_codes::resolve_qr_code))
                    .route("/{id}", web::get().to(qr_codes::get_qr_code))
                    .route("/{id}", web::delete().to(qr_codes::delete_qr_code)),
            )
            .service(
                web::scope("/themes")
                    // before `/{id}`, which would otherwise swallow it
                    .route("/active", web::get().to(themes::active_theme))
                    .route("", web::get().to(themes::list_themes))
                    .route("", web::post().to(themes::create_theme))
                    .route("/{id}", web::get().to(themes::get_theme))
                    .route("/{id}", web::put().to(themes::update_theme))
                    .route("/{id}", web::delete().to(themes::delete_theme)),
            )
            .route("/logs", web::get().to(logs::list_logs)),
    );
}

/// Build an actix-web `Server` bound to `host:port` from the config.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, config: &AppConfig) -> std::io::Result<Server> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))?;
    let state = AppState::new(pool, config);
    serve(listener, state, JwtKeys::new(&config.jwt_secret, config.jwt_expiration_minutes))
}

/// Run the application on an already bound listener.
pub fn serve(listener: TcpListener, state: AppState, keys: JwtKeys) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let keys = web::Data::new(keys);

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(keys.clone())
            .app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
            .app_data(web::QueryConfig::default().error_handler(errors::query_error_handler))
            .wrap(Logger::default())
            .route("/health", web::get().to(health::health))
            .service(openapi::swagger_ui())
            .configure(configure)
    })
    .listen(listener)?
    .run())
}
