use thiserror::Error;

/// Store failures; all surface as `Unavailable`
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Could not open database {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Schema migration failed: {source}")]
    Migration {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Database error: {operation} failed: {source}")]
    Operation {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Starting transaction failed: {source}")]
    TransactionBegin {
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Committing transaction failed: {source}")]
    TransactionCommit {
        #[source]
        source: sea_orm::DbErr,
    },
}

impl DatabaseError {
    /// Name of the failed step, for log fields
    pub fn operation(&self) -> &str {
        match self {
            DatabaseError::Connect { .. } => "connect",
            DatabaseError::Migration { .. } => "migrate",
            DatabaseError::Operation { operation, .. } => operation,
            DatabaseError::TransactionBegin { .. } => "begin_transaction",
            DatabaseError::TransactionCommit { .. } => "commit_transaction",
        }
    }
}
