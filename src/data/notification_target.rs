//! Notification target data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

/// Repository providing database operations for notification targets.
pub struct NotificationTargetRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationTargetRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::notification_target::Model>, DbErr> {
        entity::prelude::NotificationTarget::find()
            .order_by_asc(entity::notification_target::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_channel_id(
        &self,
        channel_id: u64,
    ) -> Result<Option<entity::notification_target::Model>, DbErr> {
        entity::prelude::NotificationTarget::find()
            .filter(entity::notification_target::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    /// Creates a notification target record.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID receiving alerts
    /// - `guild_id` - Guild the channel belongs to, if known
    pub async fn create(
        &self,
        channel_id: u64,
        guild_id: Option<u64>,
    ) -> Result<entity::notification_target::Model, DbErr> {
        entity::notification_target::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(channel_id.to_string()),
            guild_id: ActiveValue::Set(guild_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Deletes the target for a channel.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted
    /// - `Err(DbErr)` - Database error
    pub async fn delete_by_channel_id(&self, channel_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::NotificationTarget::delete_many()
            .filter(entity::notification_target::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
