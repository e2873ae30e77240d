//! Tracked channel data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::platform::Platform;

/// Repository providing database operations for tracked channels.
pub struct TrackedChannelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TrackedChannelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets all tracked channels ordered by platform then handle.
    pub async fn get_all(&self) -> Result<Vec<entity::tracked_channel::Model>, DbErr> {
        entity::prelude::TrackedChannel::find()
            .order_by_asc(entity::tracked_channel::Column::Platform)
            .order_by_asc(entity::tracked_channel::Column::Handle)
            .all(self.db)
            .await
    }

    /// Finds a tracked channel by its identity.
    ///
    /// # Arguments
    /// - `platform` - Platform of the channel
    /// - `handle` - Normalized channel handle
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Channel is tracked
    /// - `Ok(None)` - Channel is not tracked
    /// - `Err(DbErr)` - Database error
    pub async fn find_by_key(
        &self,
        platform: Platform,
        handle: &str,
    ) -> Result<Option<entity::tracked_channel::Model>, DbErr> {
        entity::prelude::TrackedChannel::find()
            .filter(entity::tracked_channel::Column::Platform.eq(platform.as_str()))
            .filter(entity::tracked_channel::Column::Handle.eq(handle))
            .one(self.db)
            .await
    }

    /// Creates a tracked channel record.
    ///
    /// Callers are expected to check for duplicates first; the unique index on
    /// `(platform, handle)` rejects them otherwise.
    pub async fn create(
        &self,
        platform: Platform,
        handle: &str,
    ) -> Result<entity::tracked_channel::Model, DbErr> {
        entity::tracked_channel::ActiveModel {
            id: ActiveValue::NotSet,
            platform: ActiveValue::Set(platform.as_str().to_string()),
            handle: ActiveValue::Set(handle.to_string()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Deletes a tracked channel by its identity.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted (0 or 1)
    /// - `Err(DbErr)` - Database error
    pub async fn delete_by_key(&self, platform: Platform, handle: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::TrackedChannel::delete_many()
            .filter(entity::tracked_channel::Column::Platform.eq(platform.as_str()))
            .filter(entity::tracked_channel::Column::Handle.eq(handle))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
