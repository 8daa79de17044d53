use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::user::UserResponse;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication (case-insensitive)
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Response model for an established session
#[derive(Object, Debug)]
pub struct SessionResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Session expiration (Unix timestamp)
    pub expires_at: i64,

    /// The authenticated user with the roles held at login
    pub user: UserResponse,
}
