use thiserror::Error;

pub mod authorization;
pub mod credential;
pub mod database;
pub mod location;
pub mod role;
pub mod session;
pub mod user;
pub mod validation;

pub use authorization::AuthorizationError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use location::LocationError;
pub use role::RoleError;
pub use session::SessionError;
pub use user::UserError;
pub use validation::ValidationError;

/// Internal error type for store, provider and coordinator operations
///
/// Hybrid design separates infrastructure errors (shared) from domain errors.
/// Not exposed via API - endpoints convert through `ApiError::from_internal_error`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Role(#[from] RoleError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Failure taxonomy every error collapses to at the API boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    Unavailable,
    Internal,
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InternalError::Database(_) => ErrorKind::Unavailable,
            InternalError::Parse { .. } | InternalError::Crypto { .. } => ErrorKind::Internal,
            InternalError::Session(_) => ErrorKind::Unauthenticated,
            InternalError::Credential(e) => e.kind(),
            InternalError::User(e) => e.kind(),
            InternalError::Role(e) => e.kind(),
            InternalError::Location(e) => e.kind(),
            InternalError::Authorization(e) => e.kind(),
            InternalError::Validation(_) => ErrorKind::Validation,
        }
    }
}
