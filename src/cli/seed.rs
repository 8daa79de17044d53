// Seed command implementation
// Creates the default roles, an administrator and sample locations

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{EnvironmentProvider, SystemEnvironment};
use crate::coordinators::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::{RoleError, UserError};
use crate::stores::{LocationStore, RoleStore, UserStore};
use crate::types::db::role;
use crate::types::internal::context::RequestContext;
use crate::types::internal::location::LocationFields;
use crate::types::internal::principal::{ADMIN_ROLE, USER_ROLE};

const DEFAULT_ADMIN_USERNAME: &str = "admin";

const SAMPLE_LOCATIONS: [(&str, &str, i32); 3] = [
    ("Location 1", "123 Main St", 10),
    ("Location 2", "456 Oak Ave", 20),
    ("Location 3", "789 Pine Ln", 15),
];

/// Credentials for the seeded administrator
pub struct SeedSettings {
    admin_username: String,
    admin_password: Option<String>,
}

impl SeedSettings {
    /// Read `SEED_ADMIN_USERNAME` and `SEED_ADMIN_PASSWORD`
    ///
    /// Without a password no administrator is created.
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Self {
        Self {
            admin_username: env
                .get_non_empty("SEED_ADMIN_USERNAME")
                .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string()),
            admin_password: env.get_var("SEED_ADMIN_PASSWORD").filter(|p| !p.is_empty()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_provider(&SystemEnvironment)
    }

    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }
}

impl std::fmt::Debug for SeedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedSettings")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// What a seeding run wrote
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub roles_created: usize,
    pub admin_created: bool,
    pub locations_created: usize,
}

/// Whether the database has never been seeded
pub async fn is_unseeded(db: &DatabaseConnection) -> Result<bool, InternalError> {
    Ok(RoleStore::new().list(db).await?.is_empty())
}

/// Seed the database; rows that already exist are kept
pub async fn seed_database(app_data: &AppData, settings: &SeedSettings) -> Result<SeedReport, InternalError> {
    let ctx = RequestContext::for_cli("seed");
    let role_store = RoleStore::new();
    let location_store = LocationStore::new();
    let mut report = SeedReport::default();

    // Hash before opening the transaction; hashing is slow
    let admin_hash = match &settings.admin_password {
        Some(password) => Some(app_data.crypto_provider.hash_password(password).await?),
        None => {
            tracing::warn!(
                request_id = %ctx.request_id,
                "SEED_ADMIN_PASSWORD is not set; skipping admin account"
            );
            None
        }
    };

    let txn = begin_transaction(&app_data.db).await?;

    let mut admin_role = None;
    for name in [ADMIN_ROLE, USER_ROLE] {
        let (role, created) = ensure_role(&txn, &role_store, name).await?;
        if created {
            report.roles_created += 1;
        }
        if name == ADMIN_ROLE {
            admin_role = Some(role);
        }
    }

    if let (Some(hash), Some(admin_role)) = (admin_hash, admin_role) {
        let user_store = UserStore::new();
        let admin = match user_store.create(&txn, &settings.admin_username, &hash).await {
            Ok(created) => {
                report.admin_created = true;
                created
            }
            Err(InternalError::User(UserError::DuplicateUsername { .. })) => {
                tracing::debug!(username = %settings.admin_username, "Seed admin already exists");
                user_store.find_by_name(&txn, &settings.admin_username).await?
            }
            Err(e) => return Err(e),
        };
        role_store.grant(&txn, admin.id, admin_role.id).await?;
    }

    if location_store.count(&txn).await? == 0 {
        for (name, address, table_count) in SAMPLE_LOCATIONS {
            location_store
                .insert(
                    &txn,
                    LocationFields {
                        name: name.to_string(),
                        address: address.to_string(),
                        table_count,
                        manager_id: None,
                    },
                )
                .await?;
            report.locations_created += 1;
        }
    }

    commit_transaction(txn).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        source = %ctx.source,
        roles_created = report.roles_created,
        admin = %settings.admin_username(),
        admin_created = report.admin_created,
        locations_created = report.locations_created,
        "Seeding complete"
    );
    Ok(report)
}

async fn ensure_role(
    conn: &impl ConnectionTrait,
    store: &RoleStore,
    name: &str,
) -> Result<(role::Model, bool), InternalError> {
    match store.find_by_name(conn, name).await {
        Ok(existing) => Ok((existing, false)),
        Err(InternalError::Role(RoleError::RoleNotFound { .. })) => Ok((store.create(conn, name).await?, true)),
        Err(e) => Err(e),
    }
}
