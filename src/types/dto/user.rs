use poem_openapi::Object;

use crate::types::db::user;
use crate::types::internal::principal::Principal;

/// Request model for administrative user creation
#[derive(Object, Debug)]
pub struct CreateUserRequest {
    #[oai(validator(min_length = 1, max_length = 64))]
    pub username: String,

    #[oai(validator(min_length = 1))]
    pub password: String,

    /// Names of the initial roles; at least one is required
    pub roles: Vec<String>,
}

/// Request model for self-service account changes
#[derive(Object, Debug)]
pub struct UpdateSelfRequest {
    /// New username
    #[oai(validator(min_length = 1, max_length = 64))]
    pub username: Option<String>,

    /// New password
    #[oai(validator(min_length = 1))]
    pub password: Option<String>,
}

/// A user with the role names currently held
#[derive(Object, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<Principal> for UserResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.user_id,
            username: principal.username,
            roles: principal.roles,
        }
    }
}

/// A user listed as a role member
#[derive(Object, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
}

impl From<user::Model> for UserSummary {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
        }
    }
}
