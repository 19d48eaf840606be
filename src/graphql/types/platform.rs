use async_graphql::*;

use crate::database::entities::platforms;
use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Command;

/// Represents any software or service that has a command line interface.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Platform {
    /// Unique identifier of the platform.
    pub id: i32,
    /// Name of the platform.
    pub name: String,
}

impl From<platforms::Model> for Platform {
    fn from(model: platforms::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[ComplexObject]
impl Platform {
    /// Commands available for this platform.
    async fn commands(&self, ctx: &Context<'_>) -> Result<Vec<Command>> {
        let context = ctx.data::<GraphQLContext>()?;
        let commands = context
            .command_service
            .list_commands_for_platform(self.id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(commands.into_iter().map(Command::from).collect())
    }
}

#[derive(InputObject)]
pub struct AddPlatformInput {
    pub name: String,
}

#[derive(InputObject)]
pub struct UpdatePlatformInput {
    pub id: i32,
    pub name: String,
}

#[derive(InputObject)]
pub struct RemovePlatformInput {
    pub id: i32,
}

#[derive(SimpleObject)]
pub struct AddPlatformPayload {
    pub platform: Platform,
}

#[derive(SimpleObject)]
pub struct UpdatePlatformPayload {
    pub platform: Platform,
}

/// Carries the platform as it was before it was removed.
#[derive(SimpleObject)]
pub struct RemovePlatformPayload {
    pub platform: Platform,
}
