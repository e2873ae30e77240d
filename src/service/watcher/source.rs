//! Watch configuration read at the start of every cycle.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        notification_target::NotificationTargetRepository, role_binding::RoleBindingRepository,
        tracked_channel::TrackedChannelRepository,
    },
    error::config::ConfigReadError,
    model::{
        notification_target::NotificationTarget, role_binding::RoleBinding,
        streamer::TrackedChannel, watch::WatchSnapshot,
    },
};

#[async_trait]
pub trait WatchConfigSource: Send + Sync {
    async fn load(&self) -> Result<WatchSnapshot, ConfigReadError>;
}

/// Reads tracked channels, targets and role bindings from the database.
///
/// Rows that fail conversion are logged and skipped so one bad row cannot hide the rest
/// of the configuration.
pub struct DbWatchConfigSource {
    db: DatabaseConnection,
}

impl DbWatchConfigSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WatchConfigSource for DbWatchConfigSource {
    async fn load(&self) -> Result<WatchSnapshot, ConfigReadError> {
        let channels = TrackedChannelRepository::new(&self.db).get_all().await?;
        let targets = NotificationTargetRepository::new(&self.db).get_all().await?;
        let bindings = RoleBindingRepository::new(&self.db).get_all().await?;

        Ok(WatchSnapshot {
            channels: convert_rows(channels, TrackedChannel::from_entity, "tracked channel"),
            targets: convert_rows(targets, NotificationTarget::from_entity, "notification target"),
            bindings: convert_rows(bindings, RoleBinding::from_entity, "role binding"),
        })
    }
}

fn convert_rows<M, T, E, F>(rows: Vec<M>, convert: F, kind: &str) -> Vec<T>
where
    F: Fn(M) -> Result<T, E>,
    E: std::fmt::Display,
{
    rows.into_iter()
        .filter_map(|row| match convert(row) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping invalid {} row: {}", kind, e);
                None
            }
        })
        .collect()
}
