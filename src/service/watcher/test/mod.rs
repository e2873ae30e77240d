use crate::{
    error::{config::ConfigReadError, delivery::DeliveryError, probe::ProbeError},
    model::{
        live::{LiveMetadata, LiveState, LiveStatus, ReNotifyPolicy},
        notification_target::NotificationTarget,
        platform::Platform,
        role_binding::RoleBinding,
        streamer::{ChannelKey, TrackedChannel},
        watch::WatchSnapshot,
    },
    service::{
        notification::{DeliveryReport, NotificationSink, RoleReport},
        prober::{registry::ProberRegistry, Prober},
        watcher::{source::WatchConfigSource, LiveStatusPoller, WatcherSettings},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

mod cache;

/// One scripted probe answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Live,
    NotLive,
    Fail,
}

impl Step {
    fn into_result(self) -> Result<LiveStatus, ProbeError> {
        match self {
            Step::Live => Ok(LiveStatus::Live(LiveMetadata {
                title: Some("scripted".to_string()),
                ..Default::default()
            })),
            Step::NotLive => Ok(LiveStatus::NotLive),
            Step::Fail => Err(ProbeError::Status { status: 500 }),
        }
    }
}

/// Prober that replays a per-handle script; handles without steps left fail.
#[derive(Default)]
struct ScriptedProber {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
}

impl ScriptedProber {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn script(&self, handle: &str, steps: &[Step]) {
        self.scripts
            .lock()
            .unwrap()
            .entry(handle.to_string())
            .or_default()
            .extend(steps.iter().copied());
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(handle)
            .and_then(|steps| steps.pop_front())
            .unwrap_or(Step::Fail);
        step.into_result()
    }
}

/// Sink that records every call and fails delivery to chosen channels.
#[derive(Default)]
struct RecordingSink {
    notifications: Mutex<Vec<(ChannelKey, Vec<u64>)>>,
    role_calls: Mutex<Vec<(ChannelKey, bool, usize)>>,
    failing_channels: Mutex<HashSet<u64>>,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn fail_channel(&self, channel_id: u64) {
        self.failing_channels.lock().unwrap().insert(channel_id);
    }

    fn notifications(&self) -> Vec<(ChannelKey, Vec<u64>)> {
        self.notifications.lock().unwrap().clone()
    }

    fn notification_count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    fn role_calls(&self) -> Vec<(ChannelKey, bool, usize)> {
        self.role_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(
        &self,
        channel: &TrackedChannel,
        _metadata: &LiveMetadata,
        targets: &[NotificationTarget],
    ) -> DeliveryReport {
        let failing = self.failing_channels.lock().unwrap().clone();
        let mut report = DeliveryReport::default();

        for target in targets {
            if failing.contains(&target.channel_id) {
                report.failed.push(DeliveryError::Rejected {
                    channel_id: target.channel_id,
                    reason: "missing access".to_string(),
                });
            } else {
                report.delivered.push(target.channel_id);
            }
        }

        self.notifications
            .lock()
            .unwrap()
            .push((channel.key(), report.delivered.clone()));
        report
    }

    async fn set_presence_role(
        &self,
        channel: &TrackedChannel,
        is_live: bool,
        bindings: &[RoleBinding],
    ) -> RoleReport {
        self.role_calls
            .lock()
            .unwrap()
            .push((channel.key(), is_live, bindings.len()));

        RoleReport {
            added: if is_live { bindings.len() } else { 0 },
            removed: if is_live { 0 } else { bindings.len() },
            ..Default::default()
        }
    }
}

/// Configuration source whose snapshot tests can swap or break between cycles.
#[derive(Default)]
struct StaticSource {
    snapshot: Mutex<WatchSnapshot>,
    broken: Mutex<bool>,
}

impl StaticSource {
    fn new(snapshot: WatchSnapshot) -> Arc<Self> {
        Arc::new(Self {
            snapshot: Mutex::new(snapshot),
            broken: Mutex::new(false),
        })
    }

    fn set(&self, snapshot: WatchSnapshot) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    fn set_broken(&self, broken: bool) {
        *self.broken.lock().unwrap() = broken;
    }
}

#[async_trait]
impl WatchConfigSource for StaticSource {
    async fn load(&self) -> Result<WatchSnapshot, ConfigReadError> {
        if *self.broken.lock().unwrap() {
            return Err(ConfigReadError(sea_orm::DbErr::Custom(
                "database is locked".to_string(),
            )));
        }
        Ok(self.snapshot.lock().unwrap().clone())
    }
}

fn at(minutes: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_772_388_000, 0).unwrap() + ChronoDuration::minutes(minutes)
}

fn channel(id: i32, platform: Platform, handle: &str) -> TrackedChannel {
    TrackedChannel {
        id,
        platform,
        handle: handle.to_string(),
        created_at: at(0),
    }
}

fn target(id: i32, channel_id: u64) -> NotificationTarget {
    NotificationTarget {
        id,
        channel_id,
        guild_id: Some(1),
        created_at: at(0),
    }
}

fn binding(id: i32, platform: Platform, handle: &str) -> RoleBinding {
    RoleBinding {
        id,
        guild_id: 1,
        platform,
        handle: handle.to_string(),
        user_id: 10 + id as u64,
        role_id: 100,
        created_at: at(0),
    }
}

fn snapshot(channels: Vec<TrackedChannel>, targets: Vec<NotificationTarget>) -> WatchSnapshot {
    WatchSnapshot {
        channels,
        targets,
        bindings: vec![],
    }
}

/// Poller wired to one scripted prober for both platforms.
fn poller(
    source: Arc<StaticSource>,
    prober: Arc<ScriptedProber>,
    sink: Arc<RecordingSink>,
    renotify: ReNotifyPolicy,
) -> LiveStatusPoller {
    let registry = ProberRegistry::new()
        .with(Platform::Twitch, prober.clone())
        .with(Platform::Kick, prober);

    LiveStatusPoller::new(
        source,
        registry,
        sink,
        WatcherSettings {
            probe_timeout: Duration::from_secs(5),
            probe_concurrency: 4,
            renotify,
        },
    )
}

fn state_of(poller: &LiveStatusPoller, platform: Platform, handle: &str) -> Option<LiveState> {
    poller.states().get(&ChannelKey::new(platform, handle)).cloned()
}
