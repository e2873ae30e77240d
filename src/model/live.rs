//! Live-status state machine.
//!
//! Each tracked channel is a two-state machine (`OFFLINE`, `LIVE`) with no terminal
//! state. A probe produces an [`Observation`]; [`decide`] maps the prior [`LiveState`]
//! and the observation to a [`Transition`], which the poller acts on and then records
//! with [`LiveState::apply`]. Unknown observations never move the machine.

use chrono::{DateTime, Duration, Utc};

/// Metadata reported by a status source for a live channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveMetadata {
    pub title: Option<String>,
    pub viewer_count: Option<u64>,
    /// Fully rendered thumbnail URL (templates already substituted).
    pub thumbnail_url: Option<String>,
    /// Game or category the stream is in.
    pub category: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Successful answer from a status source.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveStatus {
    Live(LiveMetadata),
    NotLive,
}

impl LiveStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, LiveStatus::Live(_))
    }

    pub fn observation(&self) -> Observation {
        match self {
            LiveStatus::Live(_) => Observation::Live,
            LiveStatus::NotLive => Observation::NotLive,
        }
    }
}

/// What a single probe told us about a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Live,
    NotLive,
    /// The probe failed; nothing is known.
    Unknown,
}

/// Per-channel state owned by the poller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveState {
    pub is_live: bool,
    /// When the current live run was first observed.
    pub live_since: Option<DateTime<Utc>>,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub notification_count: u32,
}

impl LiveState {
    /// Records a transition that the poller has already acted on.
    pub fn apply(&mut self, transition: Transition, now: DateTime<Utc>) {
        match transition {
            Transition::WentLive => {
                self.is_live = true;
                self.live_since = Some(now);
                self.last_notified_at = Some(now);
                self.notification_count += 1;
            }
            Transition::Renotify => {
                self.last_notified_at = Some(now);
                self.notification_count += 1;
            }
            Transition::WentOffline => {
                self.is_live = false;
                self.live_since = None;
            }
            Transition::Unchanged => {}
        }
    }

    /// Converts a cached row back into in-memory state.
    pub fn from_entity(entity: &entity::live_state::Model) -> Self {
        Self {
            is_live: entity.is_live,
            live_since: entity.live_since,
            last_notified_at: entity.last_notified_at,
            notification_count: entity.notification_count.max(0) as u32,
        }
    }
}

/// Action the poller must take for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// OFFLINE → LIVE: notify, add presence role.
    WentLive,
    /// LIVE → LIVE after the cooldown elapsed: notify again, roles untouched.
    Renotify,
    /// LIVE → OFFLINE: remove presence role.
    WentOffline,
    Unchanged,
}

/// Re-notification behaviour for channels that stay live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReNotifyPolicy {
    /// `None` disables re-notification entirely.
    pub cooldown: Option<Duration>,
}

impl ReNotifyPolicy {
    pub fn never() -> Self {
        Self { cooldown: None }
    }

    pub fn after(cooldown: Duration) -> Self {
        Self {
            cooldown: Some(cooldown),
        }
    }
}

/// Decides the transition for one evaluation of a channel.
///
/// Pure function of its inputs. `Observation::Unknown` always yields
/// `Transition::Unchanged` so a failed probe can never fire an offline transition.
pub fn decide(
    prev: &LiveState,
    observation: Observation,
    now: DateTime<Utc>,
    policy: &ReNotifyPolicy,
) -> Transition {
    match (prev.is_live, observation) {
        (_, Observation::Unknown) => Transition::Unchanged,
        (false, Observation::Live) => Transition::WentLive,
        (true, Observation::NotLive) => Transition::WentOffline,
        (false, Observation::NotLive) => Transition::Unchanged,
        (true, Observation::Live) => match (policy.cooldown, prev.last_notified_at) {
            (None, _) => Transition::Unchanged,
            (Some(_), None) => Transition::Renotify,
            (Some(cooldown), Some(last)) if now - last >= cooldown => Transition::Renotify,
            (Some(_), Some(_)) => Transition::Unchanged,
        },
    }
}
