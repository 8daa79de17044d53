// API layer - HTTP endpoints
pub mod health;
pub mod location;
pub mod role;
pub mod session;
pub mod user;

use std::net::IpAddr;
use std::sync::Arc;

pub use health::HealthApi;
pub use location::LocationApi;
pub use role::RoleApi;
pub use session::SessionApi;
pub use user::UserApi;

use poem::{Request, Route};
use poem_openapi::{OpenApiService, SecurityScheme, auth::Bearer, types::ParseFromJSON};

use crate::AppData;
use crate::coordinators::SessionCoordinator;
use crate::errors::internal::ValidationError;
use crate::errors::{ApiError, InternalError};
use crate::types::internal::context::RequestContext;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

impl BearerAuth {
    pub fn token(&self) -> &str {
        &self.0.token
    }
}

pub trait Api {
    fn extract_ip_address(&self, req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Context for a caller that presented no credentials
    fn anonymous_context(&self, req: &Request) -> RequestContext {
        RequestContext::for_api(self.extract_ip_address(req))
    }
}

/// Resolve the bearer token into a context carrying the caller's principal
///
/// Roles are read from the store on every call.
pub(crate) async fn authenticated_context(
    api: &impl Api,
    sessions: &SessionCoordinator,
    req: &Request,
    auth: &BearerAuth,
) -> Result<RequestContext, ApiError> {
    let ctx = api.anonymous_context(req);
    sessions
        .authenticate(ctx, auth.token())
        .await
        .map_err(ApiError::from_internal_error)
}

/// Parse a JSON body against its request model
///
/// Handlers that must authorize before judging the body take it as raw JSON
/// and parse it here.
pub(crate) fn parse_body<T: ParseFromJSON>(value: serde_json::Value) -> Result<T, InternalError> {
    T::parse_from_json(Some(value)).map_err(|e| {
        ValidationError::MalformedBody {
            message: e.into_message(),
        }
        .into()
    })
}

/// Build the HTTP application: OpenAPI endpoints under `/api`, Swagger UI under `/swagger`
pub fn build_routes(app_data: Arc<AppData>, server_url: &str) -> Route {
    let sessions = Arc::new(SessionCoordinator::new(app_data.clone()));

    let apis = (
        HealthApi::new(app_data.db.clone()),
        SessionApi::new(sessions.clone()),
        LocationApi::new(app_data.clone(), sessions.clone()),
        RoleApi::new(app_data.clone(), sessions.clone()),
        UserApi::new(app_data, sessions),
    );

    let api_service = OpenApiService::new(apis, "Locations API", env!("CARGO_PKG_VERSION"))
        .server(server_url);
    let ui = api_service.swagger_ui();

    Route::new().nest("/api", api_service).nest("/swagger", ui)
}
