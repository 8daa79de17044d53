use thiserror::Error;

use super::ErrorKind;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// Unknown username or wrong password, reported identically
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    PasswordHashingFailed(String),
}

impl CredentialError {
    pub fn hashing_failed(err: impl std::fmt::Display) -> Self {
        CredentialError::PasswordHashingFailed(err.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::InvalidCredentials => ErrorKind::Unauthenticated,
            CredentialError::PasswordHashingFailed(_) => ErrorKind::Internal,
        }
    }
}
