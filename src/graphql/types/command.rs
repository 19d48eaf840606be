use async_graphql::*;

use crate::database::entities::commands;
use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Platform;

/// Represents any executable command.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Command {
    /// Unique identifier of the command.
    pub id: i32,
    /// How to or help for the command.
    pub how_to: String,
    /// The command line to execute.
    pub command_line: String,
    /// Identifier of the platform this command belongs to.
    pub platform_id: i32,
}

impl From<commands::Model> for Command {
    fn from(model: commands::Model) -> Self {
        Self {
            id: model.id,
            how_to: model.how_to,
            command_line: model.command_line,
            platform_id: model.platform_id,
        }
    }
}

#[ComplexObject]
impl Command {
    /// The platform this command belongs to.
    async fn platform(&self, ctx: &Context<'_>) -> Result<Option<Platform>> {
        let context = ctx.data::<GraphQLContext>()?;
        let platform = context
            .platform_service
            .find_platform(self.platform_id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(platform.map(Platform::from))
    }
}

#[derive(InputObject)]
pub struct AddCommandInput {
    pub how_to: String,
    pub command_line: String,
    pub platform_id: i32,
}

#[derive(SimpleObject)]
pub struct AddCommandPayload {
    pub command: Command,
}
