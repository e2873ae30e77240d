//! Notification target factory for creating test alert destinations.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating notification targets with customizable fields.
pub struct NotificationTargetFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    guild_id: Option<String>,
}

impl<'a> NotificationTargetFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - channel_id: auto-incremented snowflake-like number
    /// - guild_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            channel_id: (100_000_000 + id).to_string(),
            guild_id: None,
        }
    }

    /// Sets the Discord channel ID.
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Sets the Discord guild ID the channel belongs to.
    pub fn guild_id(mut self, guild_id: Option<String>) -> Self {
        self.guild_id = guild_id;
        self
    }

    /// Builds and inserts the notification target into the database.
    pub async fn build(self) -> Result<entity::notification_target::Model, DbErr> {
        entity::notification_target::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(self.channel_id),
            guild_id: ActiveValue::Set(self.guild_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a notification target with default values.
pub async fn create_notification_target(
    db: &DatabaseConnection,
) -> Result<entity::notification_target::Model, DbErr> {
    NotificationTargetFactory::new(db).build().await
}
