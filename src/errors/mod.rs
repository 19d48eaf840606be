//! Domain error types for the mutation handlers
//!
//! Every storage-facing operation returns one of these enums instead of a
//! bare `DbErr`, so a missing row or a dangling reference is a typed
//! condition the GraphQL layer can report with a stable error code.
//!
//! # Error Categories
//!
//! - **PlatformError**: lookups and writes against the `platforms` table
//! - **CommandError**: lookups and writes against the `commands` table,
//!   including broken references to a platform
//!
//! # Examples
//!
//! ```rust
//! use commander::errors::{CommandError, PlatformError};
//!
//! let err = PlatformError::NotFound(42);
//! assert!(err.is_not_found());
//! assert_eq!(err.error_code(), "NOT_FOUND");
//!
//! let err = CommandError::InvalidPlatform(7);
//! assert!(err.is_client_error());
//! assert_eq!(err.error_code(), "INVALID_REFERENCE");
//! ```

pub mod command;
pub mod common;
pub mod platform;

pub use command::CommandError;
pub use common::ToGraphQLError;
pub use platform::PlatformError;

/// Result type alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Result type alias for command operations
pub type CommandResult<T> = Result<T, CommandError>;
