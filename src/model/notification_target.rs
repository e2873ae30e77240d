//! Notification target domain models.

use chrono::{DateTime, Utc};

use crate::{
    dto::target::{CreateNotificationTargetDto, NotificationTargetDto},
    error::AppError,
    util::parse::parse_u64_from_string,
};

/// Discord channel that receives live alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationTarget {
    pub id: i32,
    /// Discord channel ID (stored as String).
    pub channel_id: u64,
    /// Guild the channel belongs to, when known.
    pub guild_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl NotificationTarget {
    /// Converts an entity model to a notification target domain model.
    ///
    /// # Returns
    /// - `Ok(NotificationTarget)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - Stored channel or guild ID is not a valid u64
    pub fn from_entity(entity: entity::notification_target::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            guild_id: entity.guild_id.map(parse_u64_from_string).transpose()?,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> NotificationTargetDto {
        NotificationTargetDto {
            id: self.id,
            channel_id: self.channel_id,
            guild_id: self.guild_id,
            created_at: self.created_at,
        }
    }
}

/// Parameters for registering a notification target.
#[derive(Debug, Clone)]
pub struct CreateNotificationTargetParam {
    pub channel_id: u64,
    pub guild_id: Option<u64>,
}

impl From<CreateNotificationTargetDto> for CreateNotificationTargetParam {
    fn from(dto: CreateNotificationTargetDto) -> Self {
        Self {
            channel_id: dto.channel_id,
            guild_id: dto.guild_id,
        }
    }
}
