use thiserror::Error;

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User already exists: {username}")]
    DuplicateUsername { username: String },

    #[error("User not found: {username}")]
    UserNotFound { username: String },

    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: i32 },

    /// Deleting a user who is still the assigned manager of a location
    #[error("User {user_id} manages {location_count} location(s)")]
    ManagesLocations { user_id: i32, location_count: u64 },
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::DuplicateUsername { .. } | UserError::ManagesLocations { .. } => {
                ErrorKind::Conflict
            }
            UserError::UserNotFound { .. } | UserError::UserIdNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
