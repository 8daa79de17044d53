use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::errors::InternalError;
use crate::errors::internal::UserError;
use crate::stores::{LocationStore, is_foreign_key_violation, is_unique_violation, normalize};
use crate::types::db::user;
use crate::types::internal::auth::PasswordHash;

/// Changes applied by [`UserStore::update`]; `None` leaves a field untouched
#[derive(Debug, Default, Clone)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password_hash: Option<PasswordHash>,
}

/// Users and their credential material
///
/// Username uniqueness is enforced by the unique index on
/// `normalized_username`, so concurrent creates with the same
/// case-insensitive name cannot both succeed.
#[derive(Debug, Default, Clone)]
pub struct UserStore;

impl UserStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_name(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<user::Model, InternalError> {
        user::Entity::find()
            .filter(user::Column::NormalizedUsername.eq(normalize(username)))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_name", e))?
            .ok_or_else(|| {
                UserError::UserNotFound {
                    username: username.to_string(),
                }
                .into()
            })
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<user::Model, InternalError> {
        user::Entity::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))?
            .ok_or_else(|| UserError::UserIdNotFound { user_id }.into())
    }

    pub async fn exists(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<bool, InternalError> {
        let count = user::Entity::find_by_id(user_id)
            .count(conn)
            .await
            .map_err(|e| InternalError::database("user_exists", e))?;
        Ok(count > 0)
    }

    /// Insert a new user
    ///
    /// # Errors
    /// * `UserError::DuplicateUsername` - a user with the same case-insensitive name exists
    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
        password_hash: &PasswordHash,
    ) -> Result<user::Model, InternalError> {
        let now = Utc::now().timestamp();
        let new_user = user::ActiveModel {
            username: Set(username.trim().to_string()),
            normalized_username: Set(normalize(username)),
            password_hash: Set(password_hash.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        new_user.insert(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateUsername {
                    username: username.to_string(),
                }
                .into()
            } else {
                InternalError::database("create_user", e)
            }
        })
    }

    /// Rename and/or re-credential an existing user
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        changes: UserUpdate,
    ) -> Result<user::Model, InternalError> {
        let existing = self.find_by_id(conn, user_id).await?;
        let mut active: user::ActiveModel = existing.into();

        let new_username = changes.username.clone();
        if let Some(username) = &changes.username {
            active.username = Set(username.trim().to_string());
            active.normalized_username = Set(normalize(username));
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash.0);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::DuplicateUsername {
                    username: new_username.unwrap_or_default(),
                }
                .into()
            } else {
                InternalError::database("update_user", e)
            }
        })
    }

    /// Remove a user; memberships and sessions cascade
    ///
    /// # Errors
    /// * `UserError::UserIdNotFound` - no such user
    /// * `UserError::ManagesLocations` - the user is still the manager of a location
    pub async fn delete(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<(), InternalError> {
        let managed = LocationStore::new().count_managed_by(conn, user_id).await?;
        if managed > 0 {
            return Err(UserError::ManagesLocations {
                user_id,
                location_count: managed,
            }
            .into());
        }

        let result = user::Entity::delete_by_id(user_id).exec(conn).await;
        match result {
            Ok(res) if res.rows_affected == 0 => Err(UserError::UserIdNotFound { user_id }.into()),
            Ok(_) => Ok(()),
            // A location picked this user as manager after the count above
            Err(e) if is_foreign_key_violation(&e) => {
                let location_count = LocationStore::new().count_managed_by(conn, user_id).await?;
                Err(UserError::ManagesLocations {
                    user_id,
                    location_count,
                }
                .into())
            }
            Err(e) => Err(InternalError::database("delete_user", e)),
        }
    }
}
