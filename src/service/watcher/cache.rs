//! Optional persistence of the poller's state map.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::live_state::LiveStateRepository,
    error::AppError,
    model::{live::LiveState, platform::Platform, streamer::ChannelKey},
};

#[async_trait]
pub trait LiveStateCache: Send + Sync {
    async fn load(&self) -> Result<Vec<(ChannelKey, LiveState)>, AppError>;

    async fn store(&self, key: &ChannelKey, state: &LiveState) -> Result<(), AppError>;

    async fn remove(&self, key: &ChannelKey) -> Result<(), AppError>;
}

pub struct DbLiveStateCache {
    db: DatabaseConnection,
}

impl DbLiveStateCache {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LiveStateCache for DbLiveStateCache {
    async fn load(&self) -> Result<Vec<(ChannelKey, LiveState)>, AppError> {
        let rows = LiveStateRepository::new(&self.db).get_all().await?;

        let mut states = Vec::with_capacity(rows.len());
        for row in rows {
            match row.platform.parse::<Platform>() {
                Ok(platform) => states.push((
                    ChannelKey::new(platform, row.handle.clone()),
                    LiveState::from_entity(&row),
                )),
                Err(e) => tracing::warn!("Ignoring cached live state {}: {}", row.id, e),
            }
        }

        Ok(states)
    }

    async fn store(&self, key: &ChannelKey, state: &LiveState) -> Result<(), AppError> {
        LiveStateRepository::new(&self.db).upsert(key, state).await?;
        Ok(())
    }

    async fn remove(&self, key: &ChannelKey) -> Result<(), AppError> {
        LiveStateRepository::new(&self.db).delete_by_key(key).await?;
        Ok(())
    }
}
