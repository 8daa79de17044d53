use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::SessionError;
use crate::types::db::session;
use crate::types::internal::auth::Claims;

/// Issues and validates HS256 access tokens bound to session rows
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    /// Encode a token for the session; it expires with the session
    pub fn generate_jwt(&self, session: &session::Model) -> Result<String, InternalError> {
        let claims = Claims {
            sub: session.user_id.to_string(),
            exp: session.expires_at,
            iat: Utc::now().timestamp(),
            jti: session.id.clone(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", e.to_string()))
    }

    /// Validate signature and expiry, returning the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            JwtErrorKind::ExpiredSignature => SessionError::ExpiredToken.into(),
            JwtErrorKind::InvalidSignature => {
                tracing::warn!("Rejected token with invalid signature");
                SessionError::invalid_token("invalid signature").into()
            }
            _ => SessionError::invalid_token("malformed token").into(),
        })
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .finish()
    }
}
