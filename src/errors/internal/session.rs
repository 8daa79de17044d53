use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// No live session backs the caller (never logged in, logged out or expired)
    #[error("No active session")]
    NoSession,

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Token has expired")]
    ExpiredToken,
}

impl SessionError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
