use async_graphql::*;
use futures_util::Stream;
use std::pin::Pin;
use tokio::sync::broadcast::error::RecvError;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Platform;
use crate::services::PLATFORM_ADDED_TOPIC;

/// Represents the subscriptions available.
pub struct Subscription;

#[Subscription]
impl Subscription {
    /// The subscription for added platforms.
    async fn on_platform_added(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Pin<Box<dyn Stream<Item = Platform> + Send>>> {
        let context = ctx.data::<GraphQLContext>()?;
        let mut receiver = context
            .events
            .subscribe(PLATFORM_ADDED_TOPIC.to_string())
            .await;

        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(platform) => yield Platform::from(platform),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "{} receiver lagged, skipped {} platform(s)",
                            PLATFORM_ADDED_TOPIC,
                            skipped
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("{} channel closed", PLATFORM_ADDED_TOPIC);
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
