//! Error types for fm-db

use thiserror::Error;

/// Connector operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Referenced row does not exist (D003)
    #[error("[D003] {kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// Write would break a referential or uniqueness rule (D004)
    #[error("[D004] Constraint violated: {0}")]
    ConstraintViolation(String),

    /// Row is owned by someone else (D005)
    #[error("[D005] Conflict: {0}")]
    Conflict(String),

    /// Schema migration failed (D006)
    #[error("[D006] Migration failed: {0}")]
    MigrationError(String),

    /// Transaction management error (D007)
    #[error("[D007] Transaction failed: {0}")]
    TransactionError(String),

    /// Mutex poisoned (D008)
    #[error("[D008] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Internal error (D009)
    #[error("[D009] Internal database error: {0}")]
    Internal(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured constraint variants, so
        // classify by message.
        let msg = err.to_string();
        if msg.contains("Constraint Error") {
            DbError::ConstraintViolation(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}

impl From<fm_core::CoreError> for DbError {
    fn from(err: fm_core::CoreError) -> Self {
        DbError::Internal(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DbError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        DbError::MutexPoisoned(err.to_string())
    }
}
