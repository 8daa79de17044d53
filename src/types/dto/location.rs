use poem_openapi::{ApiResponse, Object, payload::Json, types::MaybeUndefined};

use crate::types::db::location;

/// Request model for creating or replacing a location
///
/// Field rules are checked after authorization, so a caller without write
/// access gets 403 whatever the body holds.
#[derive(Object, Debug, Clone)]
pub struct LocationRequest {
    /// Display name, must not be blank
    pub name: String,

    /// Street address, must not be blank
    pub address: String,

    /// Seating capacity, zero or more
    pub table_count: i32,

    /// User id of the assigned manager. Only administrators may set or change it.
    pub manager_id: Option<i32>,
}

/// Request model for a partial location update
///
/// Omitted fields keep their stored value. `manager_id: null` clears the
/// manager; only administrators may change it.
#[derive(Object, Debug, Clone, Default)]
pub struct LocationUpdateRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub table_count: Option<i32>,
    pub manager_id: MaybeUndefined<i32>,
}

/// Response model representing a location
#[derive(Object, Debug, Clone, PartialEq)]
pub struct LocationResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub table_count: i32,
    pub manager_id: Option<i32>,
}

impl From<location::Model> for LocationResponse {
    fn from(model: location::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            table_count: model.table_count,
            manager_id: model.manager_id,
        }
    }
}

/// API response for location creation
#[derive(ApiResponse)]
pub enum CreateLocationApiResponse {
    /// Location created
    #[oai(status = 201)]
    Created(Json<LocationResponse>),
}
