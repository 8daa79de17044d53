use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, sea_query::OnConflict,
};

use crate::errors::InternalError;
use crate::errors::internal::{RoleError, UserError};
use crate::stores::{is_unique_violation, normalize};
use crate::types::db::{role, user, user_role};

/// Roles and the user/role membership join table
///
/// Membership navigation is a join query in both directions; nothing is
/// cached, so every call observes the latest grant or revoke.
#[derive(Debug, Default, Clone)]
pub struct RoleStore;

impl RoleStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_name(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<role::Model, InternalError> {
        role::Entity::find()
            .filter(role::Column::NormalizedName.eq(normalize(name)))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role_by_name", e))?
            .ok_or_else(|| {
                RoleError::RoleNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        role_id: i32,
    ) -> Result<role::Model, InternalError> {
        role::Entity::find_by_id(role_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role_by_id", e))?
            .ok_or_else(|| RoleError::RoleIdNotFound { role_id }.into())
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<role::Model>, InternalError> {
        role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_roles", e))
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<role::Model, InternalError> {
        let new_role = role::ActiveModel {
            name: Set(name.trim().to_string()),
            normalized_name: Set(normalize(name)),
            ..Default::default()
        };

        new_role.insert(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                RoleError::DuplicateName {
                    name: name.to_string(),
                }
                .into()
            } else {
                InternalError::database("create_role", e)
            }
        })
    }

    /// Rename a role
    ///
    /// Renaming a role to its own name (in any casing) succeeds.
    pub async fn rename(
        &self,
        conn: &impl ConnectionTrait,
        role_id: i32,
        new_name: &str,
    ) -> Result<role::Model, InternalError> {
        let existing = self.find_by_id(conn, role_id).await?;
        let mut active: role::ActiveModel = existing.into();
        active.name = Set(new_name.trim().to_string());
        active.normalized_name = Set(normalize(new_name));

        active.update(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                RoleError::DuplicateName {
                    name: new_name.to_string(),
                }
                .into()
            } else {
                InternalError::database("rename_role", e)
            }
        })
    }

    /// Delete a role that nobody holds
    ///
    /// # Errors
    /// * `RoleError::RoleIdNotFound` - no such role
    /// * `RoleError::RoleInUse` - at least one user holds the role
    pub async fn delete(&self, conn: &impl ConnectionTrait, role_id: i32) -> Result<(), InternalError> {
        self.find_by_id(conn, role_id).await?;

        let member_count = self.member_count(conn, role_id).await?;
        if member_count > 0 {
            return Err(RoleError::RoleInUse {
                role_id,
                member_count,
            }
            .into());
        }

        role::Entity::delete_by_id(role_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_role", e))?;
        Ok(())
    }

    /// Grant a role; granting a held role is a no-op
    ///
    /// Returns `true` when a new membership row was written.
    pub async fn grant(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role_id: i32,
    ) -> Result<bool, InternalError> {
        self.ensure_user(conn, user_id).await?;
        self.find_by_id(conn, role_id).await?;

        let membership = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
        };

        let inserted = user_role::Entity::insert(membership)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| InternalError::database("grant_role", e))?;

        Ok(inserted > 0)
    }

    /// Revoke a role; revoking a role not held is a no-op
    ///
    /// Returns `true` when a membership row was removed.
    pub async fn revoke(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        role_id: i32,
    ) -> Result<bool, InternalError> {
        let result = user_role::Entity::delete_by_id((user_id, role_id))
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("revoke_role", e))?;

        Ok(result.rows_affected > 0)
    }

    /// Users holding the role, ordered by id
    pub async fn members_of(
        &self,
        conn: &impl ConnectionTrait,
        role_id: i32,
    ) -> Result<Vec<user::Model>, InternalError> {
        self.find_by_id(conn, role_id).await?;

        user::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::RoleId.eq(role_id))
            .order_by_asc(user::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("members_of_role", e))
    }

    /// Roles held by the user, ordered by id
    pub async fn roles_of(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Vec<role::Model>, InternalError> {
        role::Entity::find()
            .inner_join(user_role::Entity)
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("roles_of_user", e))
    }

    pub async fn member_count(
        &self,
        conn: &impl ConnectionTrait,
        role_id: i32,
    ) -> Result<u64, InternalError> {
        user_role::Entity::find()
            .filter(user_role::Column::RoleId.eq(role_id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_role_members", e))
    }

    async fn ensure_user(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<(), InternalError> {
        let count = user::Entity::find_by_id(user_id)
            .count(conn)
            .await
            .map_err(|e| InternalError::database("grant_role", e))?;
        if count == 0 {
            return Err(UserError::UserIdNotFound { user_id }.into());
        }
        Ok(())
    }
}
