//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use std::env;
use std::fmt;

/// Audience asserted on login tokens when `JWT_AUDIENCE` is unset
pub const DEFAULT_AUDIENCE: &str = "keystone";

/// Log output format for the server binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!(
                "LOG_FORMAT must be `pretty` or `json`, got `{}`",
                other
            )),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    /// Token signing secret, at least 32 bytes
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,

    /// Optional bootstrap account for the in-memory user store
    pub seed_username: Option<String>,
    pub seed_password: Option<String>,

    /// Runtime configuration
    pub log_format: LogFormat,
    pub rust_log: String,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("seed_username", &self.seed_username)
            .field("log_format", &self.log_format)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow::anyhow!("{} is required", key))
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::Pretty,
        };

        let port = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            None => 3000,
        };

        let config = Self {
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: required("JWT_ISSUER")?,
            jwt_audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.to_string()),

            seed_username: lookup("SEED_USERNAME"),
            seed_password: lookup("SEED_PASSWORD"),

            log_format,
            rust_log: lookup("RUST_LOG")
                .unwrap_or_else(|| "keystone=debug,tower_http=info".to_string()),
            port,
        };

        Ok(config)
    }
}
