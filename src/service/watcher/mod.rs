//! Live-status poller.
//!
//! [`LiveStatusPoller`] owns the per-channel [`LiveState`] map. Each cycle it reads the
//! watch configuration, probes every tracked channel with bounded fan-out, then applies
//! the resulting transitions one channel at a time: a channel going live is announced to
//! every notification target exactly once, and presence roles follow the live status.
//!
//! A failed probe is an unknown observation and leaves the channel's state untouched.

pub mod cache;
pub mod source;

#[cfg(test)]
mod test;

use chrono::{DateTime, Utc};
use futures::{stream, StreamExt};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;

use crate::{
    error::probe::ProbeError,
    model::{
        live::{decide, LiveMetadata, LiveState, LiveStatus, Observation, ReNotifyPolicy, Transition},
        streamer::{ChannelKey, TrackedChannel},
        watch::WatchSnapshot,
    },
    service::{
        notification::NotificationSink,
        prober::registry::ProberRegistry,
        watcher::{cache::LiveStateCache, source::WatchConfigSource},
    },
};

/// Tuning knobs for the poller.
#[derive(Debug, Clone, Copy)]
pub struct WatcherSettings {
    /// Longest a single probe may take before it counts as unknown.
    pub probe_timeout: Duration,
    /// Probes in flight at once.
    pub probe_concurrency: usize,
    pub renotify: ReNotifyPolicy,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(20),
            probe_concurrency: 4,
            renotify: ReNotifyPolicy::never(),
        }
    }
}

/// Read-only copy of the state map, refreshed after every cycle.
pub type PublishedStates = Arc<RwLock<HashMap<ChannelKey, LiveState>>>;

/// Counters for one poll cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub evaluated: usize,
    pub unknown: usize,
    pub went_live: usize,
    pub renotified: usize,
    pub went_offline: usize,
    pub delivered: usize,
    pub failed_deliveries: usize,
}

pub struct LiveStatusPoller {
    source: Arc<dyn WatchConfigSource>,
    probers: ProberRegistry,
    sink: Arc<dyn NotificationSink>,
    cache: Option<Arc<dyn LiveStateCache>>,
    settings: WatcherSettings,
    states: HashMap<ChannelKey, LiveState>,
    published: PublishedStates,
    last_snapshot: Option<WatchSnapshot>,
}

impl LiveStatusPoller {
    pub fn new(
        source: Arc<dyn WatchConfigSource>,
        probers: ProberRegistry,
        sink: Arc<dyn NotificationSink>,
        settings: WatcherSettings,
    ) -> Self {
        Self {
            source,
            probers,
            sink,
            cache: None,
            settings,
            states: HashMap::new(),
            published: PublishedStates::default(),
            last_snapshot: None,
        }
    }

    /// Mirrors every state change into `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn LiveStateCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Copy of the current state map.
    pub fn states(&self) -> HashMap<ChannelKey, LiveState> {
        self.states.clone()
    }

    /// Handle to the state map as of the last finished cycle.
    ///
    /// Readers never wait on a running cycle.
    pub fn published_states(&self) -> PublishedStates {
        self.published.clone()
    }

    async fn publish(&self) {
        *self.published.write().await = self.states.clone();
    }

    /// Seeds the state map, e.g. from the persisted cache at startup.
    ///
    /// Entries for channels that are no longer tracked are dropped at the start of the
    /// next cycle.
    pub async fn restore(&mut self, states: impl IntoIterator<Item = (ChannelKey, LiveState)>) {
        let mut restored = 0;
        for (key, state) in states {
            self.states.insert(key, state);
            restored += 1;
        }
        self.publish().await;
        tracing::info!("Restored live state for {} channels", restored);
    }

    /// Loads the cached state map, if a cache is configured.
    ///
    /// # Returns
    /// - Number of entries restored; 0 when there is no cache or it could not be read
    pub async fn restore_from_cache(&mut self) -> usize {
        let Some(cache) = self.cache.clone() else {
            return 0;
        };

        match cache.load().await {
            Ok(states) => {
                let count = states.len();
                self.restore(states).await;
                count
            }
            Err(e) => {
                tracing::warn!("Failed to load cached live state: {}", e);
                0
            }
        }
    }

    pub async fn run_cycle(&mut self) -> CycleSummary {
        self.run_cycle_at(Utc::now()).await
    }

    /// Runs one poll cycle as if the current time were `now`.
    pub async fn run_cycle_at(&mut self, now: DateTime<Utc>) -> CycleSummary {
        let mut summary = CycleSummary::default();

        let Some(snapshot) = self.load_snapshot().await else {
            return summary;
        };

        self.prune(&snapshot).await;
        self.publish().await;

        let results = self.probe_all(&snapshot.channels).await;

        for (channel, result) in results {
            self.evaluate(&snapshot, channel, result, now, &mut summary)
                .await;
        }

        self.publish().await;

        summary
    }

    /// Reads the configuration, falling back to the last good snapshot.
    ///
    /// Returns `None` when the read fails and no snapshot has ever been read; the cycle
    /// is then skipped entirely so restored state is not pruned against an empty list.
    async fn load_snapshot(&mut self) -> Option<WatchSnapshot> {
        match self.source.load().await {
            Ok(snapshot) => {
                self.last_snapshot = Some(snapshot.clone());
                Some(snapshot)
            }
            Err(e) => match &self.last_snapshot {
                Some(last) => {
                    tracing::warn!("{}; using last good configuration", e);
                    Some(last.clone())
                }
                None => {
                    tracing::warn!("{}; no previous configuration, skipping cycle", e);
                    None
                }
            },
        }
    }

    /// Drops state for channels that are no longer tracked.
    async fn prune(&mut self, snapshot: &WatchSnapshot) {
        let tracked: std::collections::HashSet<ChannelKey> =
            snapshot.channels.iter().map(TrackedChannel::key).collect();

        let stale: Vec<ChannelKey> = self
            .states
            .keys()
            .filter(|key| !tracked.contains(*key))
            .cloned()
            .collect();

        for key in stale {
            self.states.remove(&key);
            tracing::debug!("Dropped state for untracked channel {}", key);

            if let Some(cache) = &self.cache {
                if let Err(e) = cache.remove(&key).await {
                    tracing::warn!("Failed to drop cached state for {}: {}", key, e);
                }
            }
        }
    }

    /// Probes every channel with at most `probe_concurrency` probes in flight.
    ///
    /// Results come back in the same order as `channels`.
    async fn probe_all(
        &self,
        channels: &[TrackedChannel],
    ) -> Vec<(TrackedChannel, Result<LiveStatus, ProbeError>)> {
        let probers = &self.probers;
        let timeout = self.settings.probe_timeout;

        let mut results: Vec<(usize, TrackedChannel, Result<LiveStatus, ProbeError>)> =
            stream::iter(channels.iter().cloned().enumerate())
                .map(|(index, channel)| async move {
                    let key = channel.key();
                    let result = match tokio::time::timeout(timeout, probers.probe(&key)).await {
                        Ok(result) => result,
                        Err(_) => Err(ProbeError::Timeout(timeout)),
                    };
                    (index, channel, result)
                })
                .buffer_unordered(self.settings.probe_concurrency.max(1))
                .collect()
                .await;

        results.sort_by_key(|(index, _, _)| *index);

        results
            .into_iter()
            .map(|(_, channel, result)| (channel, result))
            .collect()
    }

    async fn evaluate(
        &mut self,
        snapshot: &WatchSnapshot,
        channel: TrackedChannel,
        result: Result<LiveStatus, ProbeError>,
        now: DateTime<Utc>,
        summary: &mut CycleSummary,
    ) {
        let key = channel.key();
        summary.evaluated += 1;

        let (observation, metadata) = match result {
            Ok(LiveStatus::Live(metadata)) => (Observation::Live, metadata),
            Ok(LiveStatus::NotLive) => (Observation::NotLive, LiveMetadata::default()),
            Err(e) => {
                tracing::warn!("Live status of {} unknown: {}", key, e);
                summary.unknown += 1;
                return;
            }
        };

        tracing::debug!("Probed {}: {:?}", key, observation);

        let known = self.states.contains_key(&key);
        let prev = self.states.get(&key).cloned().unwrap_or_default();
        let transition = decide(&prev, observation, now, &self.settings.renotify);

        match transition {
            Transition::WentLive => {
                tracing::info!("{} went live", key);
                summary.went_live += 1;
                self.announce(snapshot, &channel, &metadata, summary).await;

                let bindings = snapshot.bindings_for(&key);
                if !bindings.is_empty() {
                    self.sink.set_presence_role(&channel, true, &bindings).await;
                }
            }
            Transition::Renotify => {
                tracing::info!("{} is still live, sending reminder alert", key);
                summary.renotified += 1;
                self.announce(snapshot, &channel, &metadata, summary).await;
            }
            Transition::WentOffline => {
                tracing::info!("{} went offline", key);
                summary.went_offline += 1;

                let bindings = snapshot.bindings_for(&key);
                if !bindings.is_empty() {
                    self.sink.set_presence_role(&channel, false, &bindings).await;
                }
            }
            Transition::Unchanged => {}
        }

        let mut next = prev;
        next.apply(transition, now);

        if transition != Transition::Unchanged || !known {
            self.persist(&key, &next).await;
        }
        self.states.insert(key, next);
    }

    /// Sends the alert for `channel` to every target in the snapshot.
    async fn announce(
        &self,
        snapshot: &WatchSnapshot,
        channel: &TrackedChannel,
        metadata: &LiveMetadata,
        summary: &mut CycleSummary,
    ) {
        let key = channel.key();

        if snapshot.targets.is_empty() {
            tracing::warn!("No notification targets configured; alert for {} not sent", key);
            return;
        }

        let report = self.sink.notify(channel, metadata, &snapshot.targets).await;
        summary.delivered += report.delivered_count();
        summary.failed_deliveries += report.failed_count();

        if report.all_failed() {
            tracing::warn!(
                "Alert for {} failed for all {} targets",
                key,
                report.failed_count()
            );
        } else {
            tracing::info!(
                "Alert for {} delivered to {} of {} targets",
                key,
                report.delivered_count(),
                snapshot.targets.len()
            );
        }
    }

    async fn persist(&self, key: &ChannelKey, state: &LiveState) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.store(key, state).await {
                tracing::warn!("Failed to cache live state for {}: {}", key, e);
            }
        }
    }
}
