use sea_orm::DatabaseConnection;
use std::time::Duration;

use crate::{
    data::{
        live_state::LiveStateRepository, notification_target::NotificationTargetRepository,
        role_binding::RoleBindingRepository, tracked_channel::TrackedChannelRepository,
    },
    error::{probe::ProbeError, AppError},
    model::{
        live::LiveStatus,
        notification_target::NotificationTarget,
        platform::Platform,
        streamer::{ChannelKey, CreateTrackedChannelParam, TrackedChannel},
    },
    service::{
        notification::{DeliveryReport, NotificationSink},
        prober::registry::ProberRegistry,
    },
    util::parse::normalize_handle,
};

/// Result of an on-demand test alert.
#[derive(Debug)]
pub struct TestNotificationOutcome {
    pub live: bool,
    /// Empty when the channel was not live.
    pub report: DeliveryReport,
}

pub struct StreamerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StreamerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Starts tracking a channel.
    ///
    /// # Returns
    /// - `Ok(TrackedChannel)` - Newly tracked channel
    /// - `Err(AppError::BadRequest)` - Invalid handle or channel already tracked
    pub async fn add_tracked(
        &self,
        param: CreateTrackedChannelParam,
    ) -> Result<TrackedChannel, AppError> {
        let repo = TrackedChannelRepository::new(self.db);
        let handle = normalize_handle(&param.handle)?;

        if repo.find_by_key(param.platform, &handle).await?.is_some() {
            return Err(AppError::BadRequest(format!(
                "{} is already tracked",
                ChannelKey::new(param.platform, handle)
            )));
        }

        let channel = TrackedChannel::from_entity(repo.create(param.platform, &handle).await?)?;
        tracing::info!("Now tracking {}", channel.key());

        Ok(channel)
    }

    /// Stops tracking a channel and drops its role bindings and cached state.
    ///
    /// A poll cycle already in flight finishes normally; the channel is absent from
    /// the next one.
    ///
    /// # Returns
    /// - `Ok(())` - Channel removed
    /// - `Err(AppError::NotFound)` - Channel was not tracked
    pub async fn remove_tracked(&self, platform: Platform, handle: &str) -> Result<(), AppError> {
        let handle = normalize_handle(handle)?;
        let key = ChannelKey::new(platform, handle);

        let deleted = TrackedChannelRepository::new(self.db)
            .delete_by_key(platform, &key.handle)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("{} is not tracked", key)));
        }

        let bindings = RoleBindingRepository::new(self.db)
            .delete_by_channel(platform, &key.handle)
            .await?;
        LiveStateRepository::new(self.db).delete_by_key(&key).await?;

        tracing::info!("Stopped tracking {} ({} role bindings removed)", key, bindings);

        Ok(())
    }

    pub async fn list_tracked(&self) -> Result<Vec<TrackedChannel>, AppError> {
        TrackedChannelRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(TrackedChannel::from_entity)
            .collect()
    }

    /// Probes a tracked channel once and, if it is live, sends the alert to every target.
    ///
    /// Ignores and does not modify the poller's state. A probe that takes longer than
    /// `probe_timeout` counts as unknown, as it does in the poller.
    ///
    /// # Returns
    /// - `Ok(TestNotificationOutcome)` - Probe answered
    /// - `Err(AppError::NotFound)` - Channel is not tracked
    /// - `Err(AppError::ProbeErr)` - Live status could not be determined
    pub async fn test_notification(
        &self,
        platform: Platform,
        handle: &str,
        probers: &ProberRegistry,
        sink: &dyn NotificationSink,
        probe_timeout: Duration,
    ) -> Result<TestNotificationOutcome, AppError> {
        let handle = normalize_handle(handle)?;
        let channel = TrackedChannelRepository::new(self.db)
            .find_by_key(platform, &handle)
            .await?
            .map(TrackedChannel::from_entity)
            .transpose()?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} is not tracked",
                    ChannelKey::new(platform, handle.clone())
                ))
            })?;

        let status = tokio::time::timeout(probe_timeout, probers.probe(&channel.key()))
            .await
            .map_err(|_| ProbeError::Timeout(probe_timeout))??;

        let metadata = match status {
            LiveStatus::Live(metadata) => metadata,
            LiveStatus::NotLive => {
                return Ok(TestNotificationOutcome {
                    live: false,
                    report: DeliveryReport::default(),
                })
            }
        };

        let targets = NotificationTargetRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(NotificationTarget::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        let report = sink.notify(&channel, &metadata, &targets).await;
        tracing::info!(
            "Test alert for {} delivered to {} of {} targets",
            channel.key(),
            report.delivered_count(),
            targets.len()
        );

        Ok(TestNotificationOutcome { live: true, report })
    }
}
