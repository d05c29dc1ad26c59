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
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    pub polka: PolkaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_ttl_seconds")]
    pub access_token_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_refresh_token_ttl_days")]
    pub refresh_token_ttl_days: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

/// Upper bound for token lifetimes (ten years).
pub const MAX_TTL_DAYS: i64 = 10 * 365;
const MAX_ACCESS_TOKEN_TTL_SECONDS: i64 = MAX_TTL_DAYS * 24 * 60 * 60;

fn default_max_connections() -> u32 {
    5
}

fn default_access_token_ttl_seconds() -> i64 {
    auth::authenticator::DEFAULT_ACCESS_TOKEN_TTL_SECONDS
}

fn default_refresh_token_ttl_days() -> i64 {
    crate::session::store::DEFAULT_REFRESH_TOKEN_TTL_DAYS
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: auth::PasswordHasher::DEFAULT_MEMORY_KIB,
            iterations: auth::PasswordHasher::DEFAULT_ITERATIONS,
            parallelism: auth::PasswordHasher::DEFAULT_PARALLELISM,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }
        if self.polka.api_key.trim().is_empty() {
            return Err(ConfigError::Message("polka.api_key must not be empty".into()));
        }
        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&self.jwt.access_token_ttl_seconds) {
            return Err(ConfigError::Message(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_SECONDS
            )));
        }
        if !(1..=MAX_TTL_DAYS).contains(&self.session.refresh_token_ttl_days) {
            return Err(ConfigError::Message(format!(
                "session.refresh_token_ttl_days must be between 1 and {}",
                MAX_TTL_DAYS
            )));
        }
        Ok(())
    }
}
