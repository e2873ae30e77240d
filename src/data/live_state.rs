//! Live state cache repository.
//!
//! The poller's in-memory map is authoritative. This table mirrors it so that a
//! restart during a live stream does not fire a second alert.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::{live::LiveState, streamer::ChannelKey};

pub struct LiveStateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LiveStateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::live_state::Model>, DbErr> {
        entity::prelude::LiveState::find().all(self.db).await
    }

    /// Writes the cached state for a channel, creating the row if needed.
    ///
    /// # Arguments
    /// - `key` - Channel identity
    /// - `state` - State to mirror
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored row
    /// - `Err(DbErr)` - Database error
    pub async fn upsert(
        &self,
        key: &ChannelKey,
        state: &LiveState,
    ) -> Result<entity::live_state::Model, DbErr> {
        let existing = entity::prelude::LiveState::find()
            .filter(entity::live_state::Column::Platform.eq(key.platform.as_str()))
            .filter(entity::live_state::Column::Handle.eq(key.handle.as_str()))
            .one(self.db)
            .await?;

        let now = Utc::now();
        let count = i32::try_from(state.notification_count).unwrap_or(i32::MAX);

        if let Some(existing) = existing {
            let mut active: entity::live_state::ActiveModel = existing.into();
            active.is_live = ActiveValue::Set(state.is_live);
            active.live_since = ActiveValue::Set(state.live_since);
            active.last_notified_at = ActiveValue::Set(state.last_notified_at);
            active.notification_count = ActiveValue::Set(count);
            active.updated_at = ActiveValue::Set(now);
            active.update(self.db).await
        } else {
            entity::live_state::ActiveModel {
                id: ActiveValue::NotSet,
                platform: ActiveValue::Set(key.platform.as_str().to_string()),
                handle: ActiveValue::Set(key.handle.clone()),
                is_live: ActiveValue::Set(state.is_live),
                live_since: ActiveValue::Set(state.live_since),
                last_notified_at: ActiveValue::Set(state.last_notified_at),
                notification_count: ActiveValue::Set(count),
                updated_at: ActiveValue::Set(now),
            }
            .insert(self.db)
            .await
        }
    }

    /// Drops the cached state for a channel.
    pub async fn delete_by_key(&self, key: &ChannelKey) -> Result<u64, DbErr> {
        let result = entity::prelude::LiveState::delete_many()
            .filter(entity::live_state::Column::Platform.eq(key.platform.as_str()))
            .filter(entity::live_state::Column::Handle.eq(key.handle.as_str()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
