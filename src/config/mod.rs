mod bootstrap_settings;
mod database;
mod env_provider;
mod errors;
pub mod logging;
mod secret_config;
mod secret_manager;

pub use bootstrap_settings::BootstrapSettings;
pub use database::{init_database, migrate_database};
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ConfigError;
pub use logging::init_logging;
pub use secret_config::SecretConfig;
pub use secret_manager::SecretManager;
