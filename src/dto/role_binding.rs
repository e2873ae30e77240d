use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::platform::Platform;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRoleBindingDto {
    pub guild_id: u64,
    pub platform: Platform,
    pub handle: String,
    pub user_id: u64,
    pub role_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleBindingDto {
    pub id: i32,
    pub guild_id: u64,
    pub platform: Platform,
    pub handle: String,
    pub user_id: u64,
    pub role_id: u64,
    pub created_at: DateTime<Utc>,
}
