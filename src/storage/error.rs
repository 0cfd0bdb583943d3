//! Storage-specific error types.
//!
//! All storage operations return [`StorageError`] on failure, which can be
//! matched to determine the underlying cause.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed (sqlx error).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error (e.g., a record missing its ID).
    #[error("internal error: {0}")]
    Internal(String),

    /// Invalid data in database (e.g., unknown enum value).
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl StorageError {
    /// Whether the database refused the write because of a schema constraint
    /// (CHECK, FOREIGN KEY, NOT NULL or UNIQUE).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StorageError::Database(sqlx::Error::Database(db)) => matches!(
                db.kind(),
                ErrorKind::CheckViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::UniqueViolation
            ),
            _ => false,
        }
    }
}
