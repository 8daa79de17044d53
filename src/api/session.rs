use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::{Api, BearerAuth, authenticated_context};
use crate::coordinators::SessionCoordinator;
use crate::errors::ApiError;
use crate::types::dto::common::NoContentResponse;
use crate::types::dto::session::{LoginRequest, SessionResponse};
use crate::types::dto::user::UserResponse;

/// Login, current session and logout
pub struct SessionApi {
    session_coordinator: Arc<SessionCoordinator>,
}

impl SessionApi {
    pub fn new(session_coordinator: Arc<SessionCoordinator>) -> Self {
        Self { session_coordinator }
    }
}

impl Api for SessionApi {}

#[derive(Tags)]
enum SessionTags {
    /// Session lifecycle
    Sessions,
}

#[OpenApi]
impl SessionApi {
    /// Log in with username and password
    #[oai(path = "/sessions", method = "post", tag = "SessionTags::Sessions")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<SessionResponse>, ApiError> {
        let ctx = self.anonymous_context(req);
        let issued = self
            .session_coordinator
            .login(&ctx, &body.username, &body.password)
            .await?;

        Ok(Json(SessionResponse {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_at: issued.expires_at,
            user: issued.principal.into(),
        }))
    }

    /// The authenticated user with the roles held right now
    #[oai(path = "/sessions/current", method = "get", tag = "SessionTags::Sessions")]
    async fn current(&self, req: &Request, auth: BearerAuth) -> Result<Json<UserResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let principal = self.session_coordinator.current(&ctx)?;
        Ok(Json(principal.into()))
    }

    /// Log out; the token stops working immediately
    #[oai(path = "/sessions/current", method = "delete", tag = "SessionTags::Sessions")]
    async fn logout(&self, req: &Request, auth: BearerAuth) -> Result<NoContentResponse, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        self.session_coordinator.logout(&ctx, auth.token()).await?;
        Ok(NoContentResponse::NoContent)
    }
}
