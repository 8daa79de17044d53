use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::AppData;
use crate::coordinators::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::ValidationError;
use crate::providers::PolicyProvider;
use crate::stores::RoleStore;
use crate::types::db::{role, user};
use crate::types::internal::authorization::Operation;
use crate::types::internal::context::RequestContext;

/// Role administration; every operation requires the Admin role
pub struct RoleCoordinator {
    db: DatabaseConnection,
    policy_provider: Arc<PolicyProvider>,
    role_store: RoleStore,
}

impl RoleCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            policy_provider: Arc::clone(&app_data.policy_provider),
            role_store: RoleStore::new(),
        }
    }

    fn authorize(&self, ctx: &RequestContext) -> Result<(), InternalError> {
        self.policy_provider
            .authorize(ctx, Operation::ManageRoles, None)
            .map(|_| ())
    }

    fn validate_name(name: &str) -> Result<(), InternalError> {
        if name.trim().is_empty() {
            return Err(ValidationError::BlankField { field: "name" }.into());
        }
        Ok(())
    }

    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<role::Model, InternalError> {
        self.authorize(ctx)?;
        Self::validate_name(name)?;

        let created = self.role_store.create(&self.db, name).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id(), role = %created.name, "Role created");
        Ok(created)
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<role::Model>, InternalError> {
        self.authorize(ctx)?;
        self.role_store.list(&self.db).await
    }

    pub async fn get(&self, ctx: &RequestContext, role_id: i32) -> Result<role::Model, InternalError> {
        self.authorize(ctx)?;
        self.role_store.find_by_id(&self.db, role_id).await
    }

    pub async fn rename(
        &self,
        ctx: &RequestContext,
        role_id: i32,
        new_name: &str,
    ) -> Result<role::Model, InternalError> {
        self.authorize(ctx)?;
        Self::validate_name(new_name)?;

        let renamed = self.role_store.rename(&self.db, role_id, new_name).await?;
        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id(), role_id, role = %renamed.name, "Role renamed");
        Ok(renamed)
    }

    /// Delete a role nobody holds
    ///
    /// The membership count and the delete run in one transaction.
    pub async fn delete(&self, ctx: &RequestContext, role_id: i32) -> Result<(), InternalError> {
        self.authorize(ctx)?;

        let txn = begin_transaction(&self.db).await?;
        self.role_store.delete(&txn, role_id).await?;
        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, actor = %ctx.actor_id(), role_id, "Role deleted");
        Ok(())
    }

    pub async fn members(&self, ctx: &RequestContext, role_id: i32) -> Result<Vec<user::Model>, InternalError> {
        self.authorize(ctx)?;
        self.role_store.members_of(&self.db, role_id).await
    }
}
