//! Persistence-layer error types.

use thiserror::Error;

/// Persistence errors with structured kinds.
///
/// Callers match on variants rather than the underlying driver's error
/// text, so classification never depends on message content.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,

    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("invalid column value: {0}")]
    InvalidColumn(String),

    #[error("transaction handle escaped its unit of work")]
    SessionLeaked,

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db)
                if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Self::Duplicate(db.message().to_string())
            }
            other => Self::Database(other.to_string()),
        }
    }
}

/// Result type for persistence operations.
pub type DbResult<T> = Result<T, DbError>;
