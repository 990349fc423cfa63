//! Error taxonomy shared by the record types and the store.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    /// A field write broke a declared invariant. Nothing was written.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Attempted read of a write-only field.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Uniqueness or foreign-key constraint rejected by the database.
    #[error("Integrity constraint violation: {0}")]
    IntegrityConstraintViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecordError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    #[must_use]
    pub const fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::IntegrityConstraintViolation(_))
    }
}

impl From<DbErr> for RecordError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return Self::IntegrityConstraintViolation(msg);
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return Self::IntegrityConstraintViolation(msg);
            }
            _ => {}
        }

        match err {
            // Only raised by `ActiveModelBehavior::before_save` hooks.
            DbErr::Custom(msg) => Self::Validation(msg),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for RecordError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("Blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_db_error_is_validation() {
        let err = RecordError::from(DbErr::Custom("too short".to_string()));
        assert!(matches!(err, RecordError::Validation(msg) if msg == "too short"));
    }

    #[test]
    fn test_other_db_error_is_database() {
        let err = RecordError::from(DbErr::RecordNotFound("users".to_string()));
        assert!(matches!(err, RecordError::Database(_)));
        assert!(!err.is_integrity_violation());
    }
}
