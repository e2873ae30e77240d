//! Role binding factory for creating test streamer role bindings.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating streamer role bindings with customizable fields.
pub struct RoleBindingFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    platform: String,
    handle: String,
    user_id: String,
    role_id: String,
}

impl<'a> RoleBindingFactory<'a> {
    /// Creates a new factory bound to the given streamer.
    ///
    /// Guild, user and role IDs default to unique auto-incremented numbers.
    pub fn new(
        db: &'a DatabaseConnection,
        platform: impl Into<String>,
        handle: impl Into<String>,
    ) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: (200_000_000 + id).to_string(),
            platform: platform.into(),
            handle: handle.into(),
            user_id: (300_000_000 + id).to_string(),
            role_id: (400_000_000 + id).to_string(),
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the member user ID.
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the role ID.
    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    /// Builds and inserts the role binding into the database.
    pub async fn build(self) -> Result<entity::streamer_role_binding::Model, DbErr> {
        entity::streamer_role_binding::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            platform: ActiveValue::Set(self.platform),
            handle: ActiveValue::Set(self.handle),
            user_id: ActiveValue::Set(self.user_id),
            role_id: ActiveValue::Set(self.role_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}
