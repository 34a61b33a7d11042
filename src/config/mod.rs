use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

use crate::modules::vehicles::models::DEFAULT_MAX_ASSESSED_VALUE;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    /// `None` runs the service on the in-memory vehicle store
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub max_assessed_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Configuration(format!(
                "Invalid LOG_FORMAT '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT")
                    .unwrap_or_else(|_| "pretty".to_string())
                    .parse()?,
                max_assessed_value: match env::var("MAX_ASSESSED_VALUE") {
                    Ok(raw) => Decimal::from_str(&raw).map_err(|_| {
                        AppError::Configuration("Invalid MAX_ASSESSED_VALUE".to_string())
                    })?,
                    Err(_) => DEFAULT_MAX_ASSESSED_VALUE,
                },
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.max_assessed_value <= Decimal::ZERO {
            return Err(AppError::Configuration(
                "MAX_ASSESSED_VALUE must be greater than 0".to_string(),
            ));
        }
        // DECIMAL(20, 4) leaves 16 integer digits
        if self.app.max_assessed_value >= Decimal::from(10_000_000_000_000_000i64) {
            return Err(AppError::Configuration(
                "MAX_ASSESSED_VALUE must have at most 16 integer digits".to_string(),
            ));
        }

        if let Some(database) = &self.database {
            database.validate()?;
        }

        self.server.validate()
    }

    /// Default tracing filter directive
    pub fn log_filter(&self) -> String {
        format!(
            "motortax={},actix_web=info,sqlx=warn",
            self.app.log_level
        )
    }
}
