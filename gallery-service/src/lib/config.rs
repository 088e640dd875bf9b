use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub app: AppConfig,
    pub smtp: SmtpConfig,
    pub dropbox: DropboxConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Root of the on-disk image tree, served under `/images`.
    pub images_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    /// HMAC key for remember and reset token hashes. Must not be empty.
    pub hash_secret_key: String,
    pub remember_token_hours: i64,
    pub password_reset_ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Public base URL used to build links in outgoing mail.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    /// Empty host disables delivery; messages are logged instead.
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DropboxConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_url: String,
    pub api_url: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SECURITY__HASH_SECRET_KEY, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: SERVER__HTTP_PORT=8080 overrides server.http_port
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.security.hash_secret_key.is_empty() {
            return Err(ConfigError::Message(
                "security.hash_secret_key must not be empty".to_string(),
            ));
        }
        if self.security.remember_token_hours <= 0 {
            return Err(ConfigError::Message(
                "security.remember_token_hours must be positive".to_string(),
            ));
        }
        if self.security.password_reset_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "security.password_reset_ttl_minutes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
