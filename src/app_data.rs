use std::sync::Arc;

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, SecretManager};
use crate::providers::{
    AuthenticationProvider, CredentialVerifier, CryptoProvider, PasswordCredentialVerifier,
    PolicyProvider, TokenProvider,
};

/// Centralized application data following the main-owned pattern
///
/// Everything shared is created once in `main.rs` and handed to coordinators
/// as `Arc<AppData>`.
///
/// ```text
/// main.rs
///   ↓
/// AppData::new(db, secret_manager, session_ttl)
///   ├─ db (DatabaseConnection)
///   ├─ secret_manager
///   ├─ crypto_provider        (argon2 + pepper)
///   ├─ authentication_provider (verifier + tokens + session rows)
///   └─ policy_provider
///   ↓ wrapped in Arc<AppData>
///   ├─ SessionCoordinator::new(app_data)
///   ├─ LocationCoordinator::new(app_data)
///   ├─ RoleCoordinator::new(app_data)
///   └─ UserCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub secret_manager: Arc<SecretManager>,
    pub crypto_provider: Arc<CryptoProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
    pub policy_provider: Arc<PolicyProvider>,
}

impl AppData {
    pub fn new(db: DatabaseConnection, secret_manager: Arc<SecretManager>, session_ttl: Duration) -> Self {
        let crypto_provider = Arc::new(CryptoProvider::new(secret_manager.clone()));
        let token_provider = Arc::new(TokenProvider::new(secret_manager.clone()));
        let verifier: Arc<dyn CredentialVerifier> = Arc::new(PasswordCredentialVerifier::new(
            db.clone(),
            crypto_provider.clone(),
        ));
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            verifier,
            token_provider,
            session_ttl,
        ));

        Self {
            db,
            secret_manager,
            crypto_provider,
            authentication_provider,
            policy_provider: Arc::new(PolicyProvider::new()),
        }
    }

    /// Build from loaded settings and secrets
    pub fn init(db: DatabaseConnection, settings: &BootstrapSettings, secret_manager: SecretManager) -> Self {
        tracing::debug!("Initializing AppData");
        Self::new(db, Arc::new(secret_manager), settings.session_ttl())
    }
}
