use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json};

use crate::AppData;
use crate::api::{Api, BearerAuth, authenticated_context};
use crate::coordinators::{RoleCoordinator, SessionCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::NoContentResponse;
use crate::types::dto::role::{RoleRequest, RoleResponse};
use crate::types::dto::user::UserSummary;

/// Role administration endpoints (Admin only)
pub struct RoleApi {
    role_coordinator: RoleCoordinator,
    session_coordinator: Arc<SessionCoordinator>,
}

impl RoleApi {
    pub fn new(app_data: Arc<AppData>, session_coordinator: Arc<SessionCoordinator>) -> Self {
        Self {
            role_coordinator: RoleCoordinator::new(app_data),
            session_coordinator,
        }
    }
}

impl Api for RoleApi {}

#[derive(Tags)]
enum RoleTags {
    /// Role administration
    Roles,
}

#[OpenApi]
impl RoleApi {
    /// Create a role
    #[oai(path = "/roles", method = "post", tag = "RoleTags::Roles")]
    async fn create(&self, req: &Request, auth: BearerAuth, body: Json<RoleRequest>) -> Result<Json<RoleResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let role = self.role_coordinator.create(&ctx, &body.name).await?;
        Ok(Json(role.into()))
    }

    /// List roles
    #[oai(path = "/roles", method = "get", tag = "RoleTags::Roles")]
    async fn list(&self, req: &Request, auth: BearerAuth) -> Result<Json<Vec<RoleResponse>>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let roles = self.role_coordinator.list(&ctx).await?;
        Ok(Json(roles.into_iter().map(Into::into).collect()))
    }

    /// Get one role
    #[oai(path = "/roles/:id", method = "get", tag = "RoleTags::Roles")]
    async fn get(&self, req: &Request, auth: BearerAuth, id: Path<i32>) -> Result<Json<RoleResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let role = self.role_coordinator.get(&ctx, id.0).await?;
        Ok(Json(role.into()))
    }

    /// Rename a role
    #[oai(path = "/roles/:id", method = "put", tag = "RoleTags::Roles")]
    async fn rename(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<RoleRequest>,
    ) -> Result<Json<RoleResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let role = self.role_coordinator.rename(&ctx, id.0, &body.name).await?;
        Ok(Json(role.into()))
    }

    /// Delete a role; refused while any user holds it
    #[oai(path = "/roles/:id", method = "delete", tag = "RoleTags::Roles")]
    async fn delete(&self, req: &Request, auth: BearerAuth, id: Path<i32>) -> Result<NoContentResponse, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        self.role_coordinator.delete(&ctx, id.0).await?;
        Ok(NoContentResponse::NoContent)
    }

    /// Users holding a role
    #[oai(path = "/roles/:id/members", method = "get", tag = "RoleTags::Roles")]
    async fn members(&self, req: &Request, auth: BearerAuth, id: Path<i32>) -> Result<Json<Vec<UserSummary>>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let members = self.role_coordinator.members(&ctx, id.0).await?;
        Ok(Json(members.into_iter().map(Into::into).collect()))
    }
}
