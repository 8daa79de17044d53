use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, param::Path, payload::Json, types::MaybeUndefined};

use crate::AppData;
use crate::api::{Api, BearerAuth, authenticated_context, parse_body};
use crate::coordinators::{LocationCoordinator, LocationDraft, LocationPatch, SessionCoordinator};
use crate::errors::ApiError;
use crate::types::dto::common::NoContentResponse;
use crate::types::dto::location::{
    CreateLocationApiResponse, LocationRequest, LocationResponse, LocationUpdateRequest,
};
use crate::types::internal::authorization::Operation;

/// Location registry endpoints
///
/// Reads are public. Create and delete need the Admin role; update needs the
/// Admin role or to be the location's manager.
pub struct LocationApi {
    location_coordinator: LocationCoordinator,
    session_coordinator: Arc<SessionCoordinator>,
}

impl LocationApi {
    pub fn new(app_data: Arc<AppData>, session_coordinator: Arc<SessionCoordinator>) -> Self {
        Self {
            location_coordinator: LocationCoordinator::new(app_data),
            session_coordinator,
        }
    }
}

impl Api for LocationApi {}

impl From<LocationRequest> for LocationDraft {
    fn from(body: LocationRequest) -> Self {
        Self {
            name: body.name,
            address: body.address,
            table_count: body.table_count,
            manager_id: body.manager_id,
        }
    }
}

impl From<LocationUpdateRequest> for LocationPatch {
    fn from(body: LocationUpdateRequest) -> Self {
        Self {
            name: body.name,
            address: body.address,
            table_count: body.table_count,
            manager_id: match body.manager_id {
                MaybeUndefined::Undefined => None,
                MaybeUndefined::Null => Some(None),
                MaybeUndefined::Value(manager_id) => Some(Some(manager_id)),
            },
        }
    }
}

#[derive(Tags)]
enum LocationTags {
    /// Managed locations
    Locations,
}

#[OpenApi]
impl LocationApi {
    /// List all locations
    #[oai(path = "/locations", method = "get", tag = "LocationTags::Locations")]
    async fn list(&self, req: &Request) -> Result<Json<Vec<LocationResponse>>, ApiError> {
        let ctx = self.anonymous_context(req);
        let locations = self.location_coordinator.list(&ctx).await?;
        Ok(Json(locations.into_iter().map(Into::into).collect()))
    }

    /// Get one location
    #[oai(path = "/locations/:id", method = "get", tag = "LocationTags::Locations")]
    async fn get(&self, req: &Request, id: Path<i32>) -> Result<Json<LocationResponse>, ApiError> {
        let ctx = self.anonymous_context(req);
        let location = self.location_coordinator.get(&ctx, id.0).await?;
        Ok(Json(location.into()))
    }

    /// Create a location (Admin)
    ///
    /// Body: `{name, address, table_count, manager_id?}`. A body that fails to
    /// parse is reported only once the caller is authorized.
    #[oai(path = "/locations", method = "post", tag = "LocationTags::Locations")]
    async fn create(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<serde_json::Value>,
    ) -> Result<CreateLocationApiResponse, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let draft = match parse_body::<LocationRequest>(body.0) {
            Ok(request) => LocationDraft::from(request),
            Err(e) => {
                self.location_coordinator
                    .check_access(&ctx, Operation::Create, None)
                    .await?;
                return Err(e.into());
            }
        };
        let created = self.location_coordinator.create(&ctx, draft).await?;
        Ok(CreateLocationApiResponse::Created(Json(created.into())))
    }

    /// Update a location (Admin, or its manager for everything but `manager_id`)
    ///
    /// Body: any of `{name, address, table_count, manager_id}`. Omitted fields
    /// are kept and `manager_id: null` clears the manager. A body that fails to
    /// parse is reported only once the caller is authorized.
    #[oai(path = "/locations/:id", method = "put", tag = "LocationTags::Locations")]
    async fn update(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i32>,
        body: Json<serde_json::Value>,
    ) -> Result<Json<LocationResponse>, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        let patch = match parse_body::<LocationUpdateRequest>(body.0) {
            Ok(request) => LocationPatch::from(request),
            Err(e) => {
                self.location_coordinator
                    .check_access(&ctx, Operation::Update, Some(id.0))
                    .await?;
                return Err(e.into());
            }
        };
        let updated = self.location_coordinator.update(&ctx, id.0, patch).await?;
        Ok(Json(updated.into()))
    }

    /// Delete a location (Admin)
    #[oai(path = "/locations/:id", method = "delete", tag = "LocationTags::Locations")]
    async fn delete(&self, req: &Request, auth: BearerAuth, id: Path<i32>) -> Result<NoContentResponse, ApiError> {
        let ctx = authenticated_context(self, &self.session_coordinator, req, &auth).await?;
        self.location_coordinator.delete(&ctx, id.0).await?;
        Ok(NoContentResponse::NoContent)
    }
}
