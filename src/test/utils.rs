// Test utilities shared by unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::Duration;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::SecretManager;
use crate::stores::{RoleStore, UserStore};
use crate::types::internal::auth::PasswordHash;
use crate::types::internal::context::RequestContext;
use crate::types::internal::principal::Principal;

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PEPPER: &str = "test-pepper-for-unit-tests";

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(SecretManager::new(TEST_JWT_SECRET, TEST_PEPPER).expect("Test secrets are valid"))
}

/// AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::new(db, test_secret_manager(), Duration::minutes(15)))
}

/// Insert a user holding `roles`, creating any role that does not exist yet
///
/// The stored hash is a placeholder; use [`create_login_user`] when the
/// test needs to log in.
pub async fn create_user_with_roles(db: &DatabaseConnection, username: &str, roles: &[&str]) -> Principal {
    let user = UserStore::new()
        .create(db, username, &PasswordHash("not-a-real-hash".to_string()))
        .await
        .expect("Failed to create test user");
    grant_roles(db, user.id, roles).await;

    Principal::new(user.id, user.username, roles.iter().map(|r| r.to_string()).collect())
}

/// Insert a user with a real argon2 hash so the password verifies
pub async fn create_login_user(app_data: &AppData, username: &str, password: &str, roles: &[&str]) -> Principal {
    let hash = app_data
        .crypto_provider
        .hash_password(password)
        .await
        .expect("Failed to hash test password");
    let user = UserStore::new()
        .create(&app_data.db, username, &hash)
        .await
        .expect("Failed to create test user");
    grant_roles(&app_data.db, user.id, roles).await;

    Principal::new(user.id, user.username, roles.iter().map(|r| r.to_string()).collect())
}

async fn grant_roles(db: &DatabaseConnection, user_id: i32, roles: &[&str]) {
    let store = RoleStore::new();
    for name in roles {
        let role = match store.find_by_name(db, name).await {
            Ok(role) => role,
            Err(_) => store.create(db, name).await.expect("Failed to create test role"),
        };
        store
            .grant(db, user_id, role.id)
            .await
            .expect("Failed to grant test role");
    }
}

/// API context acting as `principal`
pub fn ctx_for(principal: &Principal) -> RequestContext {
    RequestContext::for_api(None).with_principal(Some(principal.clone()))
}
