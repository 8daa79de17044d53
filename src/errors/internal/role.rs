use thiserror::Error;

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum RoleError {
    #[error("Role name already exists: {name}")]
    DuplicateName { name: String },

    #[error("Role not found: {name}")]
    RoleNotFound { name: String },

    #[error("Role ID not found: {role_id}")]
    RoleIdNotFound { role_id: i32 },

    #[error("Cannot delete role {role_id}: {member_count} user(s) are assigned to it")]
    RoleInUse { role_id: i32, member_count: u64 },
}

impl RoleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoleError::DuplicateName { .. } | RoleError::RoleInUse { .. } => ErrorKind::Conflict,
            RoleError::RoleNotFound { .. } | RoleError::RoleIdNotFound { .. } => ErrorKind::NotFound,
        }
    }
}
