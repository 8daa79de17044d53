use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::types::db::session;

/// Server-side session rows backing issued access tokens
///
/// A session is live while `terminated_at` is unset and `expires_at` lies
/// in the future.
#[derive(Debug, Default, Clone)]
pub struct SessionStore;

impl SessionStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        ttl: Duration,
    ) -> Result<session::Model, InternalError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| InternalError::parse("session_expiry", format!("lifetime {} overflows", ttl)))?;
        session::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id),
            created_at: Set(now.timestamp()),
            expires_at: Set(expires_at.timestamp()),
            terminated_at: Set(None),
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::database("create_session", e))
    }

    /// Look up a session that has neither expired nor been terminated
    pub async fn find_live(
        &self,
        conn: &impl ConnectionTrait,
        session_id: &str,
    ) -> Result<Option<session::Model>, InternalError> {
        let now = Utc::now().timestamp();
        session::Entity::find_by_id(session_id.to_string())
            .filter(session::Column::TerminatedAt.is_null())
            .filter(session::Column::ExpiresAt.gt(now))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_session", e))
    }

    /// Mark a session terminated
    ///
    /// Returns `false` if the session was unknown or already terminated.
    pub async fn terminate(
        &self,
        conn: &impl ConnectionTrait,
        session_id: &str,
    ) -> Result<bool, InternalError> {
        let result = session::Entity::update_many()
            .col_expr(
                session::Column::TerminatedAt,
                sea_orm::sea_query::Expr::value(Utc::now().timestamp()),
            )
            .filter(session::Column::Id.eq(session_id))
            .filter(session::Column::TerminatedAt.is_null())
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("terminate_session", e))?;

        Ok(result.rows_affected > 0)
    }
}
