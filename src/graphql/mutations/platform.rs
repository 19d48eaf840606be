use async_graphql::*;
use tracing::debug;

use crate::errors::ToGraphQLError;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::platform::{
    AddPlatformInput, AddPlatformPayload, Platform, RemovePlatformInput, RemovePlatformPayload,
    UpdatePlatformInput, UpdatePlatformPayload,
};

#[derive(Default)]
pub struct PlatformMutation;

#[Object]
impl PlatformMutation {
    /// Adds a platform.
    async fn add_platform(
        &self,
        ctx: &Context<'_>,
        input: AddPlatformInput,
    ) -> Result<AddPlatformPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        debug!("addPlatform requested");

        let platform = context
            .platform_service
            .add_platform(&input.name)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(AddPlatformPayload {
            platform: Platform::from(platform),
        })
    }

    /// Update a platform.
    async fn update_platform(
        &self,
        ctx: &Context<'_>,
        input: UpdatePlatformInput,
    ) -> Result<UpdatePlatformPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        debug!("updatePlatform requested for {}", input.id);

        let platform = context
            .platform_service
            .update_platform(input.id, &input.name)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(UpdatePlatformPayload {
            platform: Platform::from(platform),
        })
    }

    /// Remove a platform.
    async fn remove_platform(
        &self,
        ctx: &Context<'_>,
        input: RemovePlatformInput,
    ) -> Result<RemovePlatformPayload> {
        let context = ctx.data::<GraphQLContext>()?;
        debug!("removePlatform requested for {}", input.id);

        let platform = context
            .platform_service
            .remove_platform(input.id)
            .await
            .map_err(|e| e.to_graphql_error())?;

        Ok(RemovePlatformPayload {
            platform: Platform::from(platform),
        })
    }
}
