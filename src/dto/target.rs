use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNotificationTargetDto {
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationTargetDto {
    pub id: i32,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}
