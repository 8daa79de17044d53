use std::net::IpAddr;

use crate::types::internal::principal::Principal;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries the caller's principal explicitly into every coordinator call,
/// along with the information needed for logging and tracing.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Resolved principal; `None` for anonymous callers
    pub principal: Option<Principal>,
}

impl RequestContext {
    /// Create an anonymous RequestContext for an API request
    pub fn for_api(ip_address: Option<IpAddr>) -> Self {
        Self {
            ip_address,
            request_id: RequestId::generate(),
            source: RequestSource::API,
            principal: None,
        }
    }

    /// Create a RequestContext for CLI operations
    ///
    /// # Arguments
    /// * `command_name` - Name of the CLI command being executed
    pub fn for_cli(command_name: &str) -> Self {
        tracing::debug!("Creating CLI context for command {}", command_name);
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            source: RequestSource::CLI,
            principal: None,
        }
    }

    /// Create a RequestContext for system operations
    ///
    /// System contexts act with the given principal (bootstrap seeding
    /// runs as a synthetic administrator).
    pub fn for_system(principal: Principal) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::generate(),
            source: RequestSource::System,
            principal: Some(principal),
        }
    }

    /// Set the resolved principal
    pub fn with_principal(mut self, principal: Option<Principal>) -> Self {
        self.principal = principal;
        self
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Identifier used in log lines
    pub fn actor_id(&self) -> String {
        match (&self.source, &self.principal) {
            (_, Some(principal)) => format!("user:{}", principal.user_id),
            (RequestSource::API, None) => "anonymous".to_owned(),
            (RequestSource::CLI, None) => "cli".to_owned(),
            (RequestSource::System, None) => "system".to_owned(),
        }
    }
}
