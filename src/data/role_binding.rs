//! Streamer role binding data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::model::{platform::Platform, role_binding::CreateRoleBindingParam};

/// Repository providing database operations for streamer role bindings.
pub struct RoleBindingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleBindingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<entity::streamer_role_binding::Model>, DbErr> {
        entity::prelude::StreamerRoleBinding::find()
            .order_by_asc(entity::streamer_role_binding::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::streamer_role_binding::Model>, DbErr> {
        entity::prelude::StreamerRoleBinding::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Creates or replaces the binding for a guild and channel.
    ///
    /// If the guild already binds this channel, the member and role are updated in
    /// place; otherwise a new record is created.
    ///
    /// # Arguments
    /// - `param` - Binding parameters with a normalized handle
    ///
    /// # Returns
    /// - `Ok(Model)` - The created or updated binding
    /// - `Err(DbErr)` - Database error
    pub async fn upsert(
        &self,
        param: CreateRoleBindingParam,
    ) -> Result<entity::streamer_role_binding::Model, DbErr> {
        let existing = entity::prelude::StreamerRoleBinding::find()
            .filter(entity::streamer_role_binding::Column::GuildId.eq(param.guild_id.to_string()))
            .filter(entity::streamer_role_binding::Column::Platform.eq(param.platform.as_str()))
            .filter(entity::streamer_role_binding::Column::Handle.eq(param.handle.as_str()))
            .one(self.db)
            .await?;

        if let Some(existing) = existing {
            let mut active: entity::streamer_role_binding::ActiveModel = existing.into();
            active.user_id = ActiveValue::Set(param.user_id.to_string());
            active.role_id = ActiveValue::Set(param.role_id.to_string());
            active.update(self.db).await
        } else {
            entity::streamer_role_binding::ActiveModel {
                id: ActiveValue::NotSet,
                guild_id: ActiveValue::Set(param.guild_id.to_string()),
                platform: ActiveValue::Set(param.platform.as_str().to_string()),
                handle: ActiveValue::Set(param.handle),
                user_id: ActiveValue::Set(param.user_id.to_string()),
                role_id: ActiveValue::Set(param.role_id.to_string()),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(self.db)
            .await
        }
    }

    /// Deletes a binding by ID.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::StreamerRoleBinding::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes every binding for a channel, across all guilds.
    pub async fn delete_by_channel(&self, platform: Platform, handle: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::StreamerRoleBinding::delete_many()
            .filter(entity::streamer_role_binding::Column::Platform.eq(platform.as_str()))
            .filter(entity::streamer_role_binding::Column::Handle.eq(handle))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Deletes every binding that references a role.
    ///
    /// Used when a role is deleted from Discord.
    pub async fn delete_by_role_id(&self, role_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::StreamerRoleBinding::delete_many()
            .filter(entity::streamer_role_binding::Column::RoleId.eq(role_id.to_string()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
