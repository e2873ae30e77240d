//! Tracked channel factory for creating test streamer entries.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating tracked channels with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let channel = TrackedChannelFactory::new(&db)
///     .platform("twitch")
///     .handle("gaules")
///     .build()
///     .await?;
/// ```
pub struct TrackedChannelFactory<'a> {
    db: &'a DatabaseConnection,
    platform: String,
    handle: String,
}

impl<'a> TrackedChannelFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - platform: `"twitch"`
    /// - handle: `"streamer_{id}"` where id is auto-incremented
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            platform: "twitch".to_string(),
            handle: format!("streamer_{}", id),
        }
    }

    /// Sets the platform (`"twitch"` or `"kick"`).
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Sets the channel handle.
    pub fn handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = handle.into();
        self
    }

    /// Builds and inserts the tracked channel into the database.
    ///
    /// # Returns
    /// - `Ok(entity::tracked_channel::Model)` - Created entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::tracked_channel::Model, DbErr> {
        entity::tracked_channel::ActiveModel {
            id: ActiveValue::NotSet,
            platform: ActiveValue::Set(self.platform),
            handle: ActiveValue::Set(self.handle),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a Twitch tracked channel with default values.
///
/// Shorthand for `TrackedChannelFactory::new(db).build().await`.
pub async fn create_tracked_channel(
    db: &DatabaseConnection,
) -> Result<entity::tracked_channel::Model, DbErr> {
    TrackedChannelFactory::new(db).build().await
}
