use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::database::entities::{commands, platforms};
use crate::errors::{PlatformError, PlatformResult};
use crate::services::ValidationService;
use crate::utils::TopicEventSender;

/// Topic that receives every newly created platform
pub const PLATFORM_ADDED_TOPIC: &str = "OnPlatformAdded";

#[derive(Clone)]
pub struct PlatformService {
    db: DatabaseConnection,
    events: Arc<dyn TopicEventSender<platforms::Model>>,
}

impl PlatformService {
    pub fn new(
        db: DatabaseConnection,
        events: Arc<dyn TopicEventSender<platforms::Model>>,
    ) -> Self {
        Self { db, events }
    }

    /// Create a platform and announce it on [`PLATFORM_ADDED_TOPIC`]
    pub async fn add_platform(&self, name: &str) -> PlatformResult<platforms::Model> {
        let name = ValidationService::validate_platform_name(name)
            .map_err(|e| PlatformError::Validation(e.to_string()))?;

        let txn = self.db.begin().await?;
        let platform = platforms::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!("Added platform {} ({})", platform.id, platform.name);

        // Already committed; publish errors are logged only
        match self
            .events
            .send(PLATFORM_ADDED_TOPIC, platform.clone())
            .await
        {
            Ok(receivers) => debug!(
                "Published {} for platform {} to {} subscriber(s)",
                PLATFORM_ADDED_TOPIC, platform.id, receivers
            ),
            Err(e) => warn!(
                "Failed to publish {} for platform {}: {}",
                PLATFORM_ADDED_TOPIC, platform.id, e
            ),
        }

        Ok(platform)
    }

    /// Rename an existing platform
    pub async fn update_platform(&self, id: i32, name: &str) -> PlatformResult<platforms::Model> {
        let name = ValidationService::validate_platform_name(name)
            .map_err(|e| PlatformError::Validation(e.to_string()))?;

        // Write first so the transaction holds the write lock before reading
        let txn = self.db.begin().await?;
        let result = platforms::Entity::update_many()
            .col_expr(platforms::Column::Name, Expr::value(name))
            .filter(platforms::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(PlatformError::NotFound(id));
        }

        let updated = platforms::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PlatformError::NotFound(id))?;
        txn.commit().await?;

        info!("Renamed platform {} to {}", updated.id, updated.name);
        Ok(updated)
    }

    /// Delete a platform together with its commands, returning the platform
    /// as it was before removal
    pub async fn remove_platform(&self, id: i32) -> PlatformResult<platforms::Model> {
        // Write first so the transaction holds the write lock before reading
        let txn = self.db.begin().await?;
        let removed_commands = commands::Entity::delete_many()
            .filter(commands::Column::PlatformId.eq(id))
            .exec(&txn)
            .await?;

        let platform = platforms::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(PlatformError::NotFound(id))?;

        platforms::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(
            "Removed platform {} ({}) and {} command(s)",
            platform.id, platform.name, removed_commands.rows_affected
        );
        Ok(platform)
    }

    pub async fn find_platform(&self, id: i32) -> PlatformResult<Option<platforms::Model>> {
        debug!("Looking up platform {}", id);
        Ok(platforms::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_platforms(&self) -> PlatformResult<Vec<platforms::Model>> {
        Ok(platforms::Entity::find()
            .order_by_asc(platforms::Column::Id)
            .all(&self.db)
            .await?)
    }
}
