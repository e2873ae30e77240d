//! Live alert delivery.
//!
//! The poller talks to a [`NotificationSink`]; [`discord::DiscordNotificationSink`] is the
//! production implementation. Per-target failures are collected in the returned reports
//! and never abort delivery to the remaining targets.

pub mod builder;
pub mod discord;

#[cfg(test)]
mod test;

use async_trait::async_trait;

use crate::{
    error::delivery::DeliveryError,
    model::{
        live::LiveMetadata, notification_target::NotificationTarget, role_binding::RoleBinding,
        streamer::TrackedChannel,
    },
};

/// Outcome of sending one alert to every target.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Channel IDs the alert reached.
    pub delivered: Vec<u64>,
    pub failed: Vec<DeliveryError>,
}

impl DeliveryReport {
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// True when there were targets and none of them received the alert.
    pub fn all_failed(&self) -> bool {
        self.delivered.is_empty() && !self.failed.is_empty()
    }
}

/// Outcome of toggling presence roles for one transition.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RoleReport {
    pub added: usize,
    pub removed: usize,
    /// Member already had (or lacked) the role.
    pub unchanged: usize,
    pub failed: usize,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sends the live alert for `channel` to every target.
    async fn notify(
        &self,
        channel: &TrackedChannel,
        metadata: &LiveMetadata,
        targets: &[NotificationTarget],
    ) -> DeliveryReport;

    /// Adds (`is_live`) or removes the presence role for each binding of `channel`.
    ///
    /// Bindings for other channels are ignored.
    async fn set_presence_role(
        &self,
        channel: &TrackedChannel,
        is_live: bool,
        bindings: &[RoleBinding],
    ) -> RoleReport;
}
