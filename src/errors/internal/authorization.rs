use thiserror::Error;

use crate::types::internal::authorization::{DenyReason, Operation};

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Authentication required for {operation}")]
    Unauthenticated { operation: Operation },

    #[error("Actor {actor} is not allowed to {operation}")]
    Forbidden { actor: String, operation: Operation },
}

impl AuthorizationError {
    pub fn from_denial(reason: DenyReason, actor: String, operation: Operation) -> Self {
        match reason {
            DenyReason::Unauthenticated => Self::Unauthenticated { operation },
            DenyReason::Forbidden => Self::Forbidden { actor, operation },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthorizationError::Unauthenticated { .. } => ErrorKind::Unauthenticated,
            AuthorizationError::Forbidden { .. } => ErrorKind::Forbidden,
        }
    }
}
