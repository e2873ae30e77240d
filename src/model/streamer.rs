//! Tracked channel domain models.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::{
    dto::streamer::{CreateTrackedChannelDto, LiveStateDto, TrackedChannelDto},
    error::AppError,
    model::{live::LiveState, platform::Platform},
};

/// Identity of a tracked channel: `(platform, handle)`.
///
/// Key of the poller's state map. Rendered as `platform:handle`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelKey {
    pub platform: Platform,
    pub handle: String,
}

impl ChannelKey {
    pub fn new(platform: Platform, handle: impl Into<String>) -> Self {
        Self {
            platform,
            handle: handle.into(),
        }
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.platform, self.handle)
    }
}

/// A Twitch or Kick channel the watcher polls.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedChannel {
    pub id: i32,
    pub platform: Platform,
    /// Normalized (lowercase) channel handle.
    pub handle: String,
    pub created_at: DateTime<Utc>,
}

impl TrackedChannel {
    /// Converts an entity model to a tracked channel domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(TrackedChannel)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - Stored platform name is not recognized
    pub fn from_entity(entity: entity::tracked_channel::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            platform: entity.platform.parse()?,
            handle: entity.handle,
            created_at: entity.created_at,
        })
    }

    pub fn key(&self) -> ChannelKey {
        ChannelKey::new(self.platform, self.handle.clone())
    }

    pub fn url(&self) -> String {
        self.platform.channel_url(&self.handle)
    }

    /// Converts to a DTO, attaching the watcher's current state when known.
    pub fn into_dto(self, live: Option<&LiveState>) -> TrackedChannelDto {
        TrackedChannelDto {
            id: self.id,
            url: self.url(),
            platform: self.platform,
            handle: self.handle,
            created_at: self.created_at,
            live: live.map(|state| LiveStateDto {
                is_live: state.is_live,
                live_since: state.live_since,
                last_notified_at: state.last_notified_at,
                notification_count: state.notification_count,
            }),
        }
    }
}

/// Parameters for adding a tracked channel.
///
/// The handle is raw operator input; the service normalizes it before insert.
#[derive(Debug, Clone)]
pub struct CreateTrackedChannelParam {
    pub platform: Platform,
    pub handle: String,
}

impl From<CreateTrackedChannelDto> for CreateTrackedChannelParam {
    fn from(dto: CreateTrackedChannelDto) -> Self {
        Self {
            platform: dto.platform,
            handle: dto.handle,
        }
    }
}
