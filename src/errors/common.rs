//! GraphQL conversion for domain errors
//!
//! ```rust
//! use commander::errors::{PlatformError, ToGraphQLError};
//!
//! let err = PlatformError::NotFound(42);
//! let graphql_err = err.to_graphql_error();
//! assert_eq!(graphql_err.message, "Platform 42 not found");
//! ```

use async_graphql::{Error as GraphQLError, ErrorExtensions};

use super::*;

/// Convert domain errors to GraphQL errors with error codes
pub trait ToGraphQLError {
    /// Convert to GraphQL error with structured extensions
    fn to_graphql_error(&self) -> GraphQLError;
}

impl ToGraphQLError for PlatformError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        let message = self.to_string();

        GraphQLError::new(message).extend_with(|_, e| {
            e.set("code", code);

            match self {
                PlatformError::NotFound(id) => {
                    e.set("platformId", *id);
                }
                PlatformError::Validation(_) => {
                    e.set("resource", "Platform");
                }
                PlatformError::Database(_) => {}
            }
        })
    }
}

impl ToGraphQLError for CommandError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        let message = self.to_string();

        GraphQLError::new(message).extend_with(|_, e| {
            e.set("code", code);

            match self {
                CommandError::InvalidPlatform(id) => {
                    e.set("platformId", *id);
                }
                CommandError::Validation(_) => {
                    e.set("resource", "Command");
                }
                CommandError::Database(_) => {}
            }
        })
    }
}
