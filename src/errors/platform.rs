//! Platform-related error types

use thiserror::Error;

/// Errors raised by platform mutations and lookups
#[derive(Error, Debug)]
pub enum PlatformError {
    /// No platform with this id
    #[error("Platform {0} not found")]
    NotFound(i32),

    /// Input rejected before touching storage
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl PlatformError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(self, PlatformError::Validation(_))
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::NotFound(_))
    }

    /// Get error code for GraphQL responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlatformError::NotFound(_) => "NOT_FOUND",
            PlatformError::Validation(_) => "VALIDATION_FAILED",
            PlatformError::Database(_) => "DATABASE_ERROR",
        }
    }
}
