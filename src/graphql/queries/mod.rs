use async_graphql::*;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::{Command, Platform};

/// Represents the queries available.
#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Get all platforms
    async fn platforms(&self, ctx: &Context<'_>) -> Result<Vec<Platform>> {
        let context = ctx.data::<GraphQLContext>()?;
        let platforms = context
            .platform_service
            .list_platforms()
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(platforms.into_iter().map(Platform::from).collect())
    }

    /// Get a specific platform by ID
    async fn platform(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Platform>> {
        let context = ctx.data::<GraphQLContext>()?;
        let platform = context
            .platform_service
            .find_platform(id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(platform.map(Platform::from))
    }

    /// Get all commands
    async fn commands(&self, ctx: &Context<'_>) -> Result<Vec<Command>> {
        let context = ctx.data::<GraphQLContext>()?;
        let commands = context
            .command_service
            .list_commands()
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(commands.into_iter().map(Command::from).collect())
    }

    /// Get a specific command by ID
    async fn command(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Command>> {
        let context = ctx.data::<GraphQLContext>()?;
        let command = context
            .command_service
            .find_command(id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(command.map(Command::from))
    }
}
