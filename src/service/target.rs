use sea_orm::DatabaseConnection;

use crate::{
    data::notification_target::NotificationTargetRepository,
    error::AppError,
    model::notification_target::{CreateNotificationTargetParam, NotificationTarget},
};

pub struct NotificationTargetService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationTargetService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a Discord channel to receive live alerts.
    ///
    /// # Returns
    /// - `Ok(NotificationTarget)` - Registered target
    /// - `Err(AppError::BadRequest)` - Zero channel ID or channel already registered
    pub async fn add(
        &self,
        param: CreateNotificationTargetParam,
    ) -> Result<NotificationTarget, AppError> {
        if param.channel_id == 0 {
            return Err(AppError::BadRequest("Channel ID must be non-zero".to_string()));
        }

        let repo = NotificationTargetRepository::new(self.db);
        if repo.find_by_channel_id(param.channel_id).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "Channel {} already receives alerts",
                param.channel_id
            )));
        }

        let target = repo.create(param.channel_id, param.guild_id).await?;
        tracing::info!("Added notification target channel {}", param.channel_id);

        NotificationTarget::from_entity(target)
    }

    pub async fn list(&self) -> Result<Vec<NotificationTarget>, AppError> {
        NotificationTargetRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(NotificationTarget::from_entity)
            .collect()
    }

    /// # Returns
    /// - `Ok(())` - Target removed
    /// - `Err(AppError::NotFound)` - Channel was not a target
    pub async fn remove(&self, channel_id: u64) -> Result<(), AppError> {
        if self.remove_deleted_channel(channel_id).await? == 0 {
            return Err(AppError::NotFound(format!(
                "Channel {} is not a notification target",
                channel_id
            )));
        }
        Ok(())
    }

    /// Drops the target for a channel that no longer exists on Discord.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of targets removed (0 when the channel was not a target)
    pub async fn remove_deleted_channel(&self, channel_id: u64) -> Result<u64, AppError> {
        let deleted = NotificationTargetRepository::new(self.db)
            .delete_by_channel_id(channel_id)
            .await?;

        if deleted > 0 {
            tracing::info!("Removed notification target channel {}", channel_id);
        }

        Ok(deleted)
    }
}
