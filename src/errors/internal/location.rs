use thiserror::Error;

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Location not found: {location_id}")]
    LocationNotFound { location_id: i32 },

    /// Owner reference does not resolve to an existing user
    #[error("Unknown manager: {manager_id}")]
    UnknownOwner { manager_id: i32 },
}

impl LocationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LocationError::LocationNotFound { .. } => ErrorKind::NotFound,
            LocationError::UnknownOwner { .. } => ErrorKind::Validation,
        }
    }
}
