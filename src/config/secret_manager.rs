use std::fmt;

use crate::config::{ConfigError, EnvironmentProvider, SecretConfig, SystemEnvironment};

const JWT_SECRET: SecretConfig = SecretConfig::new("JWT_SECRET").min_length(32);
const PASSWORD_PEPPER: SecretConfig = SecretConfig::new("PASSWORD_PEPPER").min_length(16);

/// Centralized manager for application secrets
///
/// Holds the JWT signing key and the password pepper. Both are required;
/// construction fails if either is missing or too short.
pub struct SecretManager {
    jwt_secret: String,
    pepper: String,
}

impl SecretManager {
    /// Load secrets from the process environment
    pub fn init() -> Result<Self, ConfigError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let jwt_secret = Self::load_secret(env, &JWT_SECRET)?;
        let pepper = Self::load_secret(env, &PASSWORD_PEPPER)?;

        Ok(Self { jwt_secret, pepper })
    }

    /// Build from explicit values, applying the same length rules
    pub fn new(jwt_secret: impl Into<String>, pepper: impl Into<String>) -> Result<Self, ConfigError> {
        let jwt_secret = Self::validate(&JWT_SECRET, jwt_secret.into())?;
        let pepper = Self::validate(&PASSWORD_PEPPER, pepper.into())?;

        Ok(Self { jwt_secret, pepper })
    }

    /// Get the JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Get the pepper for password hashing
    pub fn pepper(&self) -> &str {
        &self.pepper
    }

    fn load_secret(env: &dyn EnvironmentProvider, config: &SecretConfig) -> Result<String, ConfigError> {
        let value = env
            .get_var(config.env_var)
            .ok_or_else(|| ConfigError::MissingSecret {
                secret_name: config.env_var.to_string(),
            })?;
        Self::validate(config, value)
    }

    fn validate(config: &SecretConfig, value: String) -> Result<String, ConfigError> {
        if value.len() < config.min_length {
            return Err(ConfigError::SecretTooShort {
                secret_name: config.env_var.to_string(),
                expected: config.min_length,
                actual: value.len(),
            });
        }
        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"<redacted>")
            .field("pepper", &"<redacted>")
            .finish()
    }
}
