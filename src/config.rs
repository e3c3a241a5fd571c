use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Process configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiration_minutes")]
    pub jwt_expiration_minutes: i64,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_application_name")]
    pub application_name: String,
    /// Base of the customer-facing menu; QR targets are built from it.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_jwt_expiration_minutes() -> i64 {
    24 * 60
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_application_name() -> String {
    "resto_service".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::{Config, File, FileFormat};

    use super::AppConfig;

    #[test]
    fn optional_settings_fall_back_to_defaults() {
        let cfg: AppConfig = Config::builder()
            .add_source(File::from_str(
                r#"{ "database_url": "postgres://localhost/resto", "jwt_secret": "s3cret" }"#,
                FileFormat::Json,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.jwt_expiration_minutes, 1440);
        assert_eq!(cfg.environment, "development");
        assert_eq!(cfg.application_name, "resto_service");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = Config::builder()
            .add_source(File::from_str(
                r#"{ "database_url": "postgres://localhost/resto" }"#,
                FileFormat::Json,
            ))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>();

        assert!(result.is_err());
    }
}
