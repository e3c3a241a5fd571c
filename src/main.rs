use dotenvy::dotenv;
use resto_service::config::AppConfig;
use resto_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().expect("DATABASE_URL and JWT_SECRET must be set");

    let pool = create_pool(&config.database_url).expect("Failed to create DB pool");
    run_migrations(&pool).expect("Failed to run database migrations");

    log::info!(
        "Starting {} ({}) at http://{}:{}",
        config.application_name,
        config.environment,
        config.host,
        config.port
    );

    build_server(pool, &config)?.await
}
