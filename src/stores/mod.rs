// Stores layer - Data access and repository pattern
//
// Stores are stateless; every method takes the connection (or open
// transaction) it should run on.
pub mod location_store;
pub mod role_store;
pub mod session_store;
pub mod user_store;

pub use location_store::LocationStore;
pub use role_store::RoleStore;
pub use session_store::SessionStore;
pub use user_store::{UserStore, UserUpdate};

use sea_orm::{DbErr, SqlErr};

/// Lowercased form used for case-insensitive unique columns
pub(crate) fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) fn is_foreign_key_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}
