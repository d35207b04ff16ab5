use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
const MIN_ADMIN_PASSWORD_LEN: usize = 12;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<SecretString>,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: SecretString::from(
                env::var("MONGODB_URI")
                    .or_else(|_| env::var("MONGO_CONN_STRING"))
                    .unwrap_or_else(|_| DEFAULT_MONGO_URI.to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizdesk".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|v| !v.trim().is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().map(SecretString::from),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Refuse to start a production deployment on development defaults.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if !self.is_production() {
            return Ok(());
        }

        if self.mongo_conn_string.expose_secret() == DEFAULT_MONGO_URI {
            return Err(AppError::InternalError(
                "MONGODB_URI is using the local default; set it for production".to_string(),
            ));
        }

        if let Some(password) = &self.admin_password {
            let len = password.expose_secret().len();
            if len < MIN_ADMIN_PASSWORD_LEN {
                return Err(AppError::InternalError(format!(
                    "ADMIN_PASSWORD is too short ({}). Must be at least {} characters.",
                    len, MIN_ADMIN_PASSWORD_LEN
                )));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: SecretString::from(DEFAULT_MONGO_URI.to_string()),
            mongo_db_name: "quizdesk-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            cors_allowed_origins: Vec::new(),
            admin_username: None,
            admin_password: None,
            app_env: "test".to_string(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
