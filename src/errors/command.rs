//! Command-related error types

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors raised by command mutations and lookups
#[derive(Error, Debug)]
pub enum CommandError {
    /// The referenced platform does not exist
    #[error("Platform {0} does not exist")]
    InvalidPlatform(i32),

    /// Input rejected before touching storage
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CommandError {
    /// Map a storage error raised while writing a command that points at
    /// `platform_id`. Foreign-key violations become [`CommandError::InvalidPlatform`].
    pub fn from_write(err: DbErr, platform_id: i32) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                CommandError::InvalidPlatform(platform_id)
            }
            _ => CommandError::Database(err),
        }
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CommandError::InvalidPlatform(_) | CommandError::Validation(_)
        )
    }

    /// Get error code for GraphQL responses
    pub fn error_code(&self) -> &'static str {
        match self {
            CommandError::InvalidPlatform(_) => "INVALID_REFERENCE",
            CommandError::Validation(_) => "VALIDATION_FAILED",
            CommandError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_platform() {
        let err = CommandError::InvalidPlatform(9);
        assert_eq!(err.to_string(), "Platform 9 does not exist");
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "INVALID_REFERENCE");
    }

    #[test]
    fn test_from_write_keeps_other_errors() {
        let err = CommandError::from_write(DbErr::Custom("connection reset".to_string()), 1);
        assert!(matches!(err, CommandError::Database(_)));
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
