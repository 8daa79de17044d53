//! Authorization policy
//!
//! [`decide`] is a pure function of the principal, the operation and the
//! stored attributes of the target resource. Rules are evaluated in order and
//! the first match wins:
//!
//! 1. No principal and the operation needs one: deny (unauthenticated)
//! 2. Admin: allow everything, including owner reassignment
//! 3. Update by the resource's owner: allow descriptive fields only
//! 4. Any other update by a non-admin: deny
//! 5. Create, delete and management operations by a non-admin: deny
//! 6. Read: allow for anyone
//!
//! Ownership compares user ids, never role names, so revoking a user's roles
//! does not remove their right to edit locations they manage.

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::authorization::{Decision, DenyReason, Operation, ResourceRef, Scope};
use crate::types::internal::context::RequestContext;
use crate::types::internal::principal::Principal;

pub fn decide(
    principal: Option<&Principal>,
    operation: Operation,
    resource: Option<&ResourceRef>,
) -> Decision {
    let Some(principal) = principal else {
        return if operation.requires_authentication() {
            Decision::Deny(DenyReason::Unauthenticated)
        } else {
            Decision::Allow(Scope::Full)
        };
    };

    if principal.is_admin() {
        return Decision::Allow(Scope::Full);
    }

    match operation {
        Operation::Update => match resource {
            Some(resource) if resource.owner_id == Some(principal.user_id) => {
                Decision::Allow(Scope::DescriptiveOnly)
            }
            _ => Decision::Deny(DenyReason::Forbidden),
        },
        Operation::Create | Operation::Delete | Operation::ManageRoles | Operation::ManageUsers => {
            Decision::Deny(DenyReason::Forbidden)
        }
        Operation::Read => Decision::Allow(Scope::Full),
    }
}

/// Applies [`decide`] to a request and turns denials into errors
#[derive(Debug, Default, Clone)]
pub struct PolicyProvider;

impl PolicyProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn authorize(
        &self,
        ctx: &RequestContext,
        operation: Operation,
        resource: Option<&ResourceRef>,
    ) -> Result<Scope, InternalError> {
        match decide(ctx.principal(), operation, resource) {
            Decision::Allow(scope) => {
                tracing::trace!(
                    request_id = %ctx.request_id,
                    actor = %ctx.actor_id(),
                    %operation,
                    ?scope,
                    "Allowed"
                );
                Ok(scope)
            }
            Decision::Deny(reason) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    actor = %ctx.actor_id(),
                    %operation,
                    %reason,
                    "Denied"
                );
                Err(AuthorizationError::from_denial(reason, ctx.actor_id(), operation).into())
            }
        }
    }
}
