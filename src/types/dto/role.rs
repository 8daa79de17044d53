use poem_openapi::Object;

use crate::types::db::role;

/// Request model for creating or renaming a role
#[derive(Object, Debug)]
pub struct RoleRequest {
    /// Role name (1-64 characters, unique ignoring case)
    #[oai(validator(min_length = 1, max_length = 64))]
    pub name: String,
}

#[derive(Object, Debug, Clone, PartialEq)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
}

impl From<role::Model> for RoleResponse {
    fn from(model: role::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
