use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::database::entities::commands;
use crate::errors::{CommandError, CommandResult};
use crate::services::ValidationService;

#[derive(Clone)]
pub struct CommandService {
    db: DatabaseConnection,
}

impl CommandService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a command attached to `platform_id`
    pub async fn add_command(
        &self,
        how_to: &str,
        command_line: &str,
        platform_id: i32,
    ) -> CommandResult<commands::Model> {
        let how_to = ValidationService::validate_how_to(how_to)
            .map_err(|e| CommandError::Validation(e.to_string()))?;
        let command_line = ValidationService::validate_command_line(command_line)
            .map_err(|e| CommandError::Validation(e.to_string()))?;

        // A missing platform surfaces as a foreign-key violation on insert
        let txn = self.db.begin().await?;
        let command = commands::ActiveModel {
            how_to: Set(how_to),
            command_line: Set(command_line),
            platform_id: Set(platform_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CommandError::from_write(e, platform_id))?;
        txn.commit().await?;

        info!(
            "Added command {} for platform {}",
            command.id, command.platform_id
        );
        Ok(command)
    }

    pub async fn find_command(&self, id: i32) -> CommandResult<Option<commands::Model>> {
        debug!("Looking up command {}", id);
        Ok(commands::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn list_commands(&self) -> CommandResult<Vec<commands::Model>> {
        Ok(commands::Entity::find()
            .order_by_asc(commands::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_commands_for_platform(
        &self,
        platform_id: i32,
    ) -> CommandResult<Vec<commands::Model>> {
        Ok(commands::Entity::find()
            .filter(commands::Column::PlatformId.eq(platform_id))
            .order_by_asc(commands::Column::Id)
            .all(&self.db)
            .await?)
    }
}
