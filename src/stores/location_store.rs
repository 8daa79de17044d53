use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::InternalError;
use crate::errors::internal::LocationError;
use crate::types::db::location;
use crate::types::internal::location::LocationFields;

/// Persistence for the protected location resource
///
/// Ownership rules live in the coordinator; this store writes whatever
/// `manager_id` it is given.
#[derive(Debug, Default, Clone)]
pub struct LocationStore;

impl LocationStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<location::Model>, InternalError> {
        location::Entity::find()
            .order_by_asc(location::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_locations", e))
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        location_id: i32,
    ) -> Result<location::Model, InternalError> {
        location::Entity::find_by_id(location_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_location", e))?
            .ok_or_else(|| LocationError::LocationNotFound { location_id }.into())
    }

    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        fields: LocationFields,
    ) -> Result<location::Model, InternalError> {
        location::ActiveModel {
            name: Set(fields.name),
            address: Set(fields.address),
            table_count: Set(fields.table_count),
            manager_id: Set(fields.manager_id),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("insert_location", e))
    }

    /// Overwrite every field of an existing location
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: location::Model,
        fields: LocationFields,
    ) -> Result<location::Model, InternalError> {
        let mut active: location::ActiveModel = existing.into();
        active.name = Set(fields.name);
        active.address = Set(fields.address);
        active.table_count = Set(fields.table_count);
        active.manager_id = Set(fields.manager_id);

        active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_location", e))
    }

    pub async fn delete(&self, conn: &impl ConnectionTrait, location_id: i32) -> Result<(), InternalError> {
        let result = location::Entity::delete_by_id(location_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_location", e))?;

        if result.rows_affected == 0 {
            return Err(LocationError::LocationNotFound { location_id }.into());
        }
        Ok(())
    }

    pub async fn count(&self, conn: &impl ConnectionTrait) -> Result<u64, InternalError> {
        location::Entity::find()
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_locations", e))
    }

    pub async fn count_managed_by(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<u64, InternalError> {
        location::Entity::find()
            .filter(location::Column::ManagerId.eq(user_id))
            .count(conn)
            .await
            .map_err(|e| InternalError::database("count_managed_locations", e))
    }
}
