use std::fmt;

use chrono::Duration;

use crate::config::{ConfigError, EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://locations.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 15;
const MAX_SESSION_TTL_MINUTES: i64 = 30 * 24 * 60;

/// Bootstrap settings for infrastructure configuration
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    session_ttl_minutes: i64,
}

impl BootstrapSettings {
    /// Load bootstrap settings, falling back to defaults for unset values
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = env
            .get_non_empty("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let server_host = env
            .get_non_empty("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let server_port = match env.get_non_empty("PORT") {
            Some(value) => Self::parse_port(&value)?,
            None => DEFAULT_PORT,
        };

        let session_ttl_minutes = match env.get_non_empty("SESSION_TTL_MINUTES") {
            Some(value) => Self::parse_ttl(&value)?,
            None => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            session_ttl_minutes,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    fn parse_port(value: &str) -> Result<u16, ConfigError> {
        match value.parse::<u16>() {
            Ok(0) | Err(_) => Err(ConfigError::invalid_setting(
                "PORT",
                format!("expected a port between 1 and 65535, got '{}'", value),
            )),
            Ok(port) => Ok(port),
        }
    }

    fn parse_ttl(value: &str) -> Result<i64, ConfigError> {
        match value.parse::<i64>() {
            Ok(minutes) if (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) => Ok(minutes),
            _ => Err(ConfigError::invalid_setting(
                "SESSION_TTL_MINUTES",
                format!(
                    "expected between 1 and {} minutes, got '{}'",
                    MAX_SESSION_TTL_MINUTES, value
                ),
            )),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Lifetime of a login session and its access token
    pub fn session_ttl(&self) -> Duration {
        Duration::minutes(self.session_ttl_minutes)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session_ttl_minutes", &self.session_ttl_minutes)
            .finish()
    }
}
