use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::{Api, BearerAuth, authenticated_context};
use crate::coordinators::{NewUser, SelfUpdate, SessionCoordinator, UserCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::NoContentResponse;
use crate::types::dto::user::{CreateUserRequest, UpdateSelfRequest, UserResponse};

/// User administration and self-service endpoints
pub struct UserApi {
    user_coordinator: UserCoordinator,
    session_coordinator: Arc<SessionCoordinator>,
}

impl UserApi {
    pub fn new(app_data: Arc<AppData>, session_coordinator: Arc<SessionCoordinator>) -> Self {
        Self {
            user_coordinator: UserCoordinator::new(app_data),
            session_coordinator,
        }
    }
}

impl Api for UserApi {}

#[derive(Tags)]
enum UserTags {
    /// User accounts
    Users,
}

#[OpenApi]
impl UserApi {
    /// Create a user with at least one role (Admin)
    #[oai(path = "/users", method = "post", tag = "UserTags::Users")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<CreateUserRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let body = body.0;
        let created = self
            .user_coordinator
            .create(
                &ctx,
                NewUser {
                    username: body.username,
                    password: body.password,
                    roles: body.roles,
                },
            )
            .await?;
        Ok(Json(created.into()))
    }

    /// Change the caller's own username or password
    #[oai(path = "/users/me", method = "put", tag = "UserTags::Users")]
    async fn update_self(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<UpdateSelfRequest>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let body = body.0;
        let updated = self
            .user_coordinator
            .update_self(
                &ctx,
                SelfUpdate {
                    username: body.username,
                    password: body.password,
                },
            )
            .await?;
        Ok(Json(updated.into()))
    }

    /// Get a user (Admin, or the user themself)
    #[oai(path = "/users/:id", method = "get", tag = "UserTags::Users")]
    async fn get(&self, req: &Request, auth: BearerAuth, id: Path<i32>) -> Result<Json<UserResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let user = self.user_coordinator.get(&ctx, id.0).await?;
        Ok(Json(user.into()))
    }

    /// Delete a user (Admin); refused while they manage a location
    #[oai(path = "/users/:id", method = "delete", tag = "UserTags::Users")]
    async fn delete(&self, req: &Request, auth: BearerAuth, id: Path<i32>) -> Result<NoContentResponse, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        self.user_coordinator.delete(&ctx, id.0).await?;
        Ok(NoContentResponse::NoContent)
    }

    /// Grant a role (Admin); granting a held role is a no-op
    #[oai(path = "/users/:id/roles/:role_id", method = "put", tag = "UserTags::Users")]
    async fn grant_role(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        role_id: Path<i32>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let user = self.user_coordinator.grant_role(&ctx, id.0, role_id.0).await?;
        Ok(Json(user.into()))
    }

    /// Revoke a role (Admin); revoking a role not held is a no-op
    #[oai(path = "/users/:id/roles/:role_id", method = "delete", tag = "UserTags::Users")]
    async fn revoke_role(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        role_id: Path<i32>,
    ) -> Result<Json<UserResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let user = self.user_coordinator.revoke_role(&ctx, id.0, role_id.0).await?;
        Ok(Json(user.into()))
    }
}
