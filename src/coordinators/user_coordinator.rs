use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::AppData;
use crate::coordinators::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::{AuthorizationError, RoleError, ValidationError};
use crate::providers::{CryptoProvider, PolicyProvider};
use crate::stores::{RoleStore, UserStore, UserUpdate};
use crate::types::internal::authorization::Operation;
use crate::types::internal::context::RequestContext;
use crate::types::internal::principal::Principal;

/// An account to create, with the names of its initial roles
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub roles: Vec<String>,
}

/// Self-service account changes; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct SelfUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// User administration and self-service
///
/// Users are returned as [`Principal`] values: id, username and the role
/// names held at the moment of the call.
pub struct UserCoordinator {
    db: DatabaseConnection,
    crypto_provider: Arc<CryptoProvider>,
    policy_provider: Arc<PolicyProvider>,
    user_store: UserStore,
    role_store: RoleStore,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            crypto_provider: Arc::clone(&app_data.crypto_provider),
            policy_provider: Arc::clone(&app_data.policy_provider),
            user_store: UserStore::new(),
            role_store: RoleStore::new(),
        }
    }

    /// Create a user holding at least one existing role
    ///
    /// # Errors
    /// * `ValidationError::EmptyRoleList` - no roles given
    /// * `ValidationError::UnknownRole` - a role name does not exist
    /// * `UserError::DuplicateUsername` - the name is taken (case-insensitive)
    pub async fn create(&self, ctx: &RequestContext, new_user: NewUser) -> Result<Principal, InternalError> {
        self.policy_provider.authorize(ctx, Operation::ManageUsers, None)?;

        if new_user.username.trim().is_empty() {
            return Err(ValidationError::BlankField { field: "username" }.into());
        }
        if new_user.password.is_empty() {
            return Err(ValidationError::BlankField { field: "password" }.into());
        }
        if new_user.roles.is_empty() {
            return Err(ValidationError::EmptyRoleList.into());
        }

        let password_hash = self.crypto_provider.hash_password(&new_user.password).await?;

        let txn = begin_transaction(&self.db).await?;
        let mut role_ids = Vec::with_capacity(new_user.roles.len());
        for name in &new_user.roles {
            let role = self
                .role_store
                .find_by_name(&txn, name)
                .await
                .map_err(|e| match e {
                    InternalError::Role(RoleError::RoleNotFound { name }) => {
                        ValidationError::UnknownRole { name }.into()
                    }
                    other => other,
                })?;
            role_ids.push(role.id);
        }

        let user = self
            .user_store
            .create(&txn, &new_user.username, &password_hash)
            .await?;
        for role_id in role_ids {
            self.role_store.grant(&txn, user.id, role_id).await?;
        }
        let created = self.load(&txn, user.id).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id(),
            user_id = created.user_id,
            roles = ?created.roles,
            "User created"
        );
        Ok(created)
    }

    /// Administrators may read anyone; other users only themselves
    pub async fn get(&self, ctx: &RequestContext, user_id: i32) -> Result<Principal, InternalError> {
        self.authorize_self_or_admin(ctx, user_id)?;
        self.load(&self.db, user_id).await
    }

    /// Rename the caller and/or change their password
    pub async fn update_self(&self, ctx: &RequestContext, update: SelfUpdate) -> Result<Principal, InternalError> {
        let principal = ctx.principal().ok_or(AuthorizationError::Unauthenticated {
            operation: Operation::Update,
        })?;

        if update.username.is_none() && update.password.is_none() {
            return Err(ValidationError::EmptyUpdate.into());
        }
        if update.username.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ValidationError::BlankField { field: "username" }.into());
        }
        if update.password.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::BlankField { field: "password" }.into());
        }

        let password_hash = match &update.password {
            Some(password) => Some(self.crypto_provider.hash_password(password).await?),
            None => None,
        };

        let changes = UserUpdate {
            username: update.username,
            password_hash,
        };
        self.user_store.update(&self.db, principal.user_id, changes).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = principal.user_id, "Account updated");
        self.load(&self.db, principal.user_id).await
    }

    /// Delete a user that manages no location
    pub async fn delete(&self, ctx: &RequestContext, user_id: i32) -> Result<(), InternalError> {
        self.policy_provider.authorize(ctx, Operation::ManageUsers, None)?;

        let txn = begin_transaction(&self.db).await?;
        self.user_store.delete(&txn, user_id).await?;
        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id(), user_id, "User deleted");
        Ok(())
    }

    /// Grant a role; already holding it is not an error
    pub async fn grant_role(&self, ctx: &RequestContext, user_id: i32, role_id: i32) -> Result<Principal, InternalError> {
        self.policy_provider.authorize(ctx, Operation::ManageRoles, None)?;

        let inserted = self.role_store.grant(&self.db, user_id, role_id).await?;
        if inserted {
            tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id(), user_id, role_id, "Role granted");
        }
        self.load(&self.db, user_id).await
    }

    /// Revoke a role; not holding it is not an error
    pub async fn revoke_role(&self, ctx: &RequestContext, user_id: i32, role_id: i32) -> Result<Principal, InternalError> {
        self.policy_provider.authorize(ctx, Operation::ManageRoles, None)?;

        let user = self.load(&self.db, user_id).await?;
        self.role_store.find_by_id(&self.db, role_id).await?;

        if self.role_store.revoke(&self.db, user_id, role_id).await? {
            tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id(), user_id, role_id, "Role revoked");
            return self.load(&self.db, user_id).await;
        }
        Ok(user)
    }

    fn authorize_self_or_admin(&self, ctx: &RequestContext, user_id: i32) -> Result<(), InternalError> {
        if ctx.principal().is_some_and(|p| p.user_id == user_id) {
            return Ok(());
        }
        self.policy_provider
            .authorize(ctx, Operation::ManageUsers, None)
            .map(|_| ())
    }

    async fn load(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<Principal, InternalError> {
        let user = self.user_store.find_by_id(conn, user_id).await?;
        let roles = self
            .role_store
            .roles_of(conn, user_id)
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect();
        Ok(Principal::new(user.id, user.username, roles))
    }
}
