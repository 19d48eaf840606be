use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::database::entities::platforms;
use crate::services::{CommandService, PlatformService};
use crate::utils::EventBroadcaster;

/// Platform notifications keyed by topic name
pub type PlatformEvents = EventBroadcaster<String, platforms::Model>;

/// Per-schema data shared by every resolver.
///
/// Services are built once from the connection pool; each service call opens
/// its own transaction, so nothing here carries state between requests.
#[derive(Clone)]
pub struct GraphQLContext {
    pub platform_service: Arc<PlatformService>,
    pub command_service: Arc<CommandService>,
    pub events: Arc<PlatformEvents>,
}

impl GraphQLContext {
    pub fn new(db: DatabaseConnection, events: Arc<PlatformEvents>) -> Self {
        let platform_service = Arc::new(PlatformService::new(db.clone(), events.clone()));
        let command_service = Arc::new(CommandService::new(db));

        Self {
            platform_service,
            command_service,
            events,
        }
    }
}
