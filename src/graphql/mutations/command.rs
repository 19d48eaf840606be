use async_graphql::*;
use tracing::debug;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::command::{AddCommandInput, AddCommandPayload, Command};

#[derive(Default)]
pub struct CommandMutation;

#[Object]
impl CommandMutation {
    /// Adds a command.
    async fn add_command(
        &self,
        ctx: &Context<'_>,
        input: AddCommandInput,
    ) -> Result<AddCommandPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        debug!("addCommand requested for platform {}", input.platform_id);

        let command = context
            .command_service
            .add_command(&input.how_to, &input.command_line, input.platform_id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(AddCommandPayload {
            command: Command::from(command),
        })
    }
}
