use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::SessionError;
use crate::providers::{AuthenticationProvider, IssuedSession};
use crate::types::internal::context::RequestContext;
use crate::types::internal::principal::Principal;

/// Login, logout and principal resolution for incoming requests
pub struct SessionCoordinator {
    db: DatabaseConnection,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl SessionCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            authentication_provider: Arc::clone(&app_data.authentication_provider),
        }
    }

    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, InternalError> {
        tracing::debug!(request_id = %ctx.request_id, ip = ?ctx.ip_address, "Login attempt");
        self.authentication_provider
            .login(&self.db, username, password)
            .await
    }

    /// Attach the principal behind `token` to the context
    ///
    /// # Errors
    /// * `SessionError` - the token is invalid or its session has ended
    pub async fn authenticate(
        &self,
        ctx: RequestContext,
        token: &str,
    ) -> Result<RequestContext, InternalError> {
        let principal = self
            .authentication_provider
            .current_principal(&self.db, Some(token))
            .await?;
        Ok(ctx.with_principal(Some(principal)))
    }

    /// The caller's principal, as resolved for this request
    pub fn current(&self, ctx: &RequestContext) -> Result<Principal, InternalError> {
        ctx.principal()
            .cloned()
            .ok_or_else(|| SessionError::NoSession.into())
    }

    pub async fn logout(&self, ctx: &RequestContext, token: &str) -> Result<(), InternalError> {
        tracing::debug!(request_id = %ctx.request_id, actor = %ctx.actor_id(), "Logout");
        self.authentication_provider.logout(&self.db, token).await
    }
}
