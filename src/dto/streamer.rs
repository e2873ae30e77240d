use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::platform::Platform;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTrackedChannelDto {
    pub platform: Platform,
    /// Channel name, `@name` or channel URL.
    pub handle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LiveStateDto {
    pub is_live: bool,
    pub live_since: Option<DateTime<Utc>>,
    pub last_notified_at: Option<DateTime<Utc>>,
    pub notification_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackedChannelDto {
    pub id: i32,
    pub platform: Platform,
    pub handle: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    /// Current watcher state; absent until the channel has been evaluated.
    pub live: Option<LiveStateDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestNotificationDto {
    pub live: bool,
    pub delivered: usize,
    pub failed: usize,
}
