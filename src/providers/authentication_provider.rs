use std::sync::Arc;

use chrono::Duration;
use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::{CredentialError, SessionError};
use crate::providers::{CredentialVerifier, TokenProvider};
use crate::stores::{RoleStore, SessionStore, UserStore};
use crate::types::internal::auth::Verification;
use crate::types::internal::principal::Principal;
use crate::types::internal::session::SessionState;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub access_token: String,
    pub expires_at: i64,
    pub principal: Principal,
}

/// Session authenticator
///
/// Drives the `Anonymous -> Authenticated -> Terminated` lifecycle. Sessions
/// are persisted rows referenced by the token's `jti`; the principal's role
/// set is re-read from the role store on every resolution.
pub struct AuthenticationProvider {
    verifier: Arc<dyn CredentialVerifier>,
    token_provider: Arc<TokenProvider>,
    session_ttl: Duration,
    user_store: UserStore,
    role_store: RoleStore,
    session_store: SessionStore,
}

impl AuthenticationProvider {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        token_provider: Arc<TokenProvider>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            verifier,
            token_provider,
            session_ttl,
            user_store: UserStore::new(),
            role_store: RoleStore::new(),
            session_store: SessionStore::new(),
        }
    }

    /// Verify credentials and open a session
    ///
    /// # Errors
    /// * `CredentialError::InvalidCredentials` - unknown user or wrong password
    pub async fn login(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, InternalError> {
        let user_id = match self.verifier.verify(username, password).await? {
            Verification::Valid { user_id } => user_id,
            Verification::Invalid => {
                tracing::info!("Login rejected for '{}'", username);
                return Err(CredentialError::InvalidCredentials.into());
            }
        };

        let session = self
            .session_store
            .create(conn, user_id, self.session_ttl)
            .await?;
        let access_token = self.token_provider.generate_jwt(&session)?;
        let principal = self.resolve_principal(conn, user_id).await?;

        tracing::info!(user_id, session_id = %session.id, "Session opened");

        Ok(IssuedSession {
            access_token,
            expires_at: session.expires_at,
            principal,
        })
    }

    /// Derive the session state for a presented bearer token
    ///
    /// A token that fails signature checks is an error; a genuine token whose
    /// session ended (logout, expiry, user deletion) is `Terminated`.
    pub async fn resolve_session(
        &self,
        conn: &impl ConnectionTrait,
        token: Option<&str>,
    ) -> Result<SessionState, InternalError> {
        let Some(token) = token else {
            return Ok(SessionState::Anonymous);
        };

        let claims = match self.token_provider.validate_jwt(token) {
            Ok(claims) => claims,
            Err(InternalError::Session(SessionError::ExpiredToken)) => {
                return Ok(SessionState::Terminated);
            }
            Err(e) => return Err(e),
        };

        let Some(session) = self.session_store.find_live(conn, &claims.jti).await? else {
            tracing::debug!(session_id = %claims.jti, "Token references an ended session");
            return Ok(SessionState::Terminated);
        };

        if claims.user_id() != Some(session.user_id) {
            return Err(SessionError::invalid_token("subject does not match session").into());
        }

        let principal = self.resolve_principal(conn, session.user_id).await?;
        Ok(SessionState::Authenticated(principal))
    }

    /// The principal behind a token
    ///
    /// # Errors
    /// * `SessionError::NoSession` - no token, or the session has ended
    pub async fn current_principal(
        &self,
        conn: &impl ConnectionTrait,
        token: Option<&str>,
    ) -> Result<Principal, InternalError> {
        self.resolve_session(conn, token)
            .await?
            .into_principal()
            .ok_or_else(|| SessionError::NoSession.into())
    }

    /// End the session behind a token (Authenticated -> Terminated)
    pub async fn logout(&self, conn: &impl ConnectionTrait, token: &str) -> Result<(), InternalError> {
        let claims = self.token_provider.validate_jwt(token)?;

        if !self.session_store.terminate(conn, &claims.jti).await? {
            return Err(SessionError::NoSession.into());
        }

        tracing::info!(session_id = %claims.jti, "Session terminated");
        Ok(())
    }

    /// Build a principal with the role set as currently stored
    pub async fn resolve_principal(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Principal, InternalError> {
        let user = self.user_store.find_by_id(conn, user_id).await?;
        let roles = self
            .role_store
            .roles_of(conn, user_id)
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect();

        Ok(Principal::new(user.id, user.username, roles))
    }
}
