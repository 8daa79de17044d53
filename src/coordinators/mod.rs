// Coordinators layer - Workflow orchestration
//
// Coordinators compose provider and store operations for specific API
// endpoints: resolve who is calling, ask the policy, then run the store
// calls (inside a transaction when several must agree).
pub mod location_coordinator;
pub mod role_coordinator;
pub mod session_coordinator;
pub mod user_coordinator;

pub use location_coordinator::{LocationCoordinator, LocationDraft, LocationPatch};
pub use role_coordinator::RoleCoordinator;
pub use session_coordinator::SessionCoordinator;
pub use user_coordinator::{NewUser, SelfUpdate, UserCoordinator};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::errors::InternalError;
use crate::errors::internal::DatabaseError;

pub(crate) async fn begin_transaction(db: &DatabaseConnection) -> Result<DatabaseTransaction, InternalError> {
    db.begin()
        .await
        .map_err(|source| DatabaseError::TransactionBegin { source }.into())
}

pub(crate) async fn commit_transaction(txn: DatabaseTransaction) -> Result<(), InternalError> {
    txn.commit()
        .await
        .map_err(|source| DatabaseError::TransactionCommit { source }.into())
}

#[cfg(test)]
mod user_coordinator_test;
