use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::AppData;
use crate::coordinators::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::{LocationError, ValidationError};
use crate::providers::PolicyProvider;
use crate::stores::{LocationStore, UserStore};
use crate::types::db::location;
use crate::types::internal::authorization::{Operation, ResourceRef, Scope};
use crate::types::internal::context::RequestContext;
use crate::types::internal::location::LocationFields;

/// Location fields as submitted by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    pub table_count: i32,
    pub manager_id: Option<i32>,
}

impl LocationDraft {
    fn validate(&self) -> Result<(), InternalError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankField { field: "name" }.into());
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::BlankField { field: "address" }.into());
        }
        if self.table_count < 0 {
            return Err(ValidationError::NegativeValue { field: "table_count" }.into());
        }
        Ok(())
    }

    fn into_fields(self, manager_id: Option<i32>) -> LocationFields {
        LocationFields {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            table_count: self.table_count,
            manager_id,
        }
    }
}

/// Partial changes to a stored location; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub table_count: Option<i32>,
    /// `Some(None)` clears the manager
    pub manager_id: Option<Option<i32>>,
}

impl LocationPatch {
    fn merge_onto(self, existing: &location::Model) -> LocationDraft {
        LocationDraft {
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            address: self.address.unwrap_or_else(|| existing.address.clone()),
            table_count: self.table_count.unwrap_or(existing.table_count),
            manager_id: self.manager_id.unwrap_or(existing.manager_id),
        }
    }
}

/// Mutation gateway for locations
///
/// Every write consults the policy before touching the row. Updates are
/// authorized against the manager stored on the row, never the one in the
/// request, and a non-admin owner's request can not move the manager
/// reference.
pub struct LocationCoordinator {
    db: DatabaseConnection,
    policy_provider: Arc<PolicyProvider>,
    location_store: LocationStore,
    user_store: UserStore,
}

impl LocationCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            policy_provider: Arc::clone(&app_data.policy_provider),
            location_store: LocationStore::new(),
            user_store: UserStore::new(),
        }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<location::Model>, InternalError> {
        self.policy_provider.authorize(ctx, Operation::Read, None)?;
        self.location_store.list(&self.db).await
    }

    pub async fn get(&self, ctx: &RequestContext, location_id: i32) -> Result<location::Model, InternalError> {
        let location = self.location_store.find_by_id(&self.db, location_id).await?;
        self.policy_provider.authorize(
            ctx,
            Operation::Read,
            Some(&ResourceRef::owned_by(location.manager_id)),
        )?;
        Ok(location)
    }

    /// Create a location (administrators only)
    ///
    /// # Errors
    /// * `AuthorizationError` - caller may not create, whatever the body says
    /// * `LocationError::UnknownOwner` - `manager_id` does not name a user
    pub async fn create(
        &self,
        ctx: &RequestContext,
        draft: LocationDraft,
    ) -> Result<location::Model, InternalError> {
        self.policy_provider.authorize(ctx, Operation::Create, None)?;
        draft.validate()?;

        let txn = begin_transaction(&self.db).await?;
        if let Some(manager_id) = draft.manager_id {
            self.ensure_manager_exists(&txn, manager_id).await?;
        }
        let manager_id = draft.manager_id;
        let created = self
            .location_store
            .insert(&txn, draft.into_fields(manager_id))
            .await?;
        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id(),
            location_id = created.id,
            manager_id = ?created.manager_id,
            "Location created"
        );
        Ok(created)
    }

    /// Apply a partial update to a location
    ///
    /// Administrators may set or clear the manager. The current manager may
    /// change descriptive fields only; the manager in their request is ignored.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        location_id: i32,
        patch: LocationPatch,
    ) -> Result<location::Model, InternalError> {
        let txn = begin_transaction(&self.db).await?;
        let existing = self.location_store.find_by_id(&txn, location_id).await?;

        let scope = self.policy_provider.authorize(
            ctx,
            Operation::Update,
            Some(&ResourceRef::owned_by(existing.manager_id)),
        )?;
        let draft = patch.merge_onto(&existing);
        draft.validate()?;

        let manager_id = match scope {
            Scope::Full => {
                if let Some(manager_id) = draft.manager_id {
                    if existing.manager_id != Some(manager_id) {
                        self.ensure_manager_exists(&txn, manager_id).await?;
                    }
                }
                draft.manager_id
            }
            Scope::DescriptiveOnly => {
                if draft.manager_id != existing.manager_id {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        location_id,
                        requested = ?draft.manager_id,
                        "Ignoring manager change from non-admin owner"
                    );
                }
                existing.manager_id
            }
        };

        let previous_manager = existing.manager_id;
        let updated = self
            .location_store
            .update(&txn, existing, draft.into_fields(manager_id))
            .await?;
        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id(),
            location_id,
            ?previous_manager,
            manager_id = ?updated.manager_id,
            "Location updated"
        );
        Ok(updated)
    }

    pub async fn delete(&self, ctx: &RequestContext, location_id: i32) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;
        let existing = self.location_store.find_by_id(&txn, location_id).await?;

        self.policy_provider.authorize(
            ctx,
            Operation::Delete,
            Some(&ResourceRef::owned_by(existing.manager_id)),
        )?;

        self.location_store.delete(&txn, location_id).await?;
        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id(),
            location_id,
            "Location deleted"
        );
        Ok(())
    }

    /// Authorize `operation` without writing anything
    ///
    /// Lets the HTTP layer report a denial ahead of a body it could not parse.
    pub async fn check_access(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        location_id: Option<i32>,
    ) -> Result<Scope, InternalError> {
        let resource = match location_id {
            Some(location_id) => {
                let existing = self.location_store.find_by_id(&self.db, location_id).await?;
                Some(ResourceRef::owned_by(existing.manager_id))
            }
            None => None,
        };
        self.policy_provider.authorize(ctx, operation, resource.as_ref())
    }

    async fn ensure_manager_exists(
        &self,
        conn: &impl ConnectionTrait,
        manager_id: i32,
    ) -> Result<(), InternalError> {
        if !self.user_store.exists(conn, manager_id).await? {
            return Err(LocationError::UnknownOwner { manager_id }.into());
        }
        Ok(())
    }
}
