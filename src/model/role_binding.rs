//! Streamer role binding domain models.

use chrono::{DateTime, Utc};

use crate::{
    dto::role_binding::{CreateRoleBindingDto, RoleBindingDto},
    error::AppError,
    model::{platform::Platform, streamer::ChannelKey},
    util::parse::parse_u64_from_string,
};

/// Binds a tracked channel to a guild member and a role.
///
/// While the channel is live the member holds the role in that guild.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBinding {
    pub id: i32,
    pub guild_id: u64,
    pub platform: Platform,
    pub handle: String,
    pub user_id: u64,
    pub role_id: u64,
    pub created_at: DateTime<Utc>,
}

impl RoleBinding {
    /// Converts an entity model to a role binding domain model.
    ///
    /// # Returns
    /// - `Ok(RoleBinding)` - The converted domain model
    /// - `Err(AppError::InternalErr)` - Invalid stored ID or platform
    pub fn from_entity(entity: entity::streamer_role_binding::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            platform: entity.platform.parse()?,
            handle: entity.handle,
            user_id: parse_u64_from_string(entity.user_id)?,
            role_id: parse_u64_from_string(entity.role_id)?,
            created_at: entity.created_at,
        })
    }

    pub fn key(&self) -> ChannelKey {
        ChannelKey::new(self.platform, self.handle.clone())
    }

    pub fn into_dto(self) -> RoleBindingDto {
        RoleBindingDto {
            id: self.id,
            guild_id: self.guild_id,
            platform: self.platform,
            handle: self.handle,
            user_id: self.user_id,
            role_id: self.role_id,
            created_at: self.created_at,
        }
    }
}

/// Parameters for binding a role to a tracked channel.
///
/// Binding again for the same guild and channel replaces the member and role.
#[derive(Debug, Clone)]
pub struct CreateRoleBindingParam {
    pub guild_id: u64,
    pub platform: Platform,
    pub handle: String,
    pub user_id: u64,
    pub role_id: u64,
}

impl From<CreateRoleBindingDto> for CreateRoleBindingParam {
    fn from(dto: CreateRoleBindingDto) -> Self {
        Self {
            guild_id: dto.guild_id,
            platform: dto.platform,
            handle: dto.handle,
            user_id: dto.user_id,
            role_id: dto.role_id,
        }
    }
}
