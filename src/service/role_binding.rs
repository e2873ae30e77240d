use sea_orm::DatabaseConnection;

use crate::{
    data::{role_binding::RoleBindingRepository, tracked_channel::TrackedChannelRepository},
    error::AppError,
    model::{
        role_binding::{CreateRoleBindingParam, RoleBinding},
        streamer::ChannelKey,
    },
    util::parse::normalize_handle,
};

pub struct RoleBindingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleBindingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Binds a guild member and role to a tracked channel.
    ///
    /// Binding the same guild and channel again replaces the member and role.
    ///
    /// # Returns
    /// - `Ok(RoleBinding)` - Created or updated binding
    /// - `Err(AppError::BadRequest)` - Zero ID, invalid handle or channel not tracked
    pub async fn bind(&self, mut param: CreateRoleBindingParam) -> Result<RoleBinding, AppError> {
        if param.guild_id == 0 || param.user_id == 0 || param.role_id == 0 {
            return Err(AppError::BadRequest(
                "Guild, user and role IDs must be non-zero".to_string(),
            ));
        }

        param.handle = normalize_handle(&param.handle)?;

        let tracked = TrackedChannelRepository::new(self.db)
            .find_by_key(param.platform, &param.handle)
            .await?;
        if tracked.is_none() {
            return Err(AppError::BadRequest(format!(
                "{} is not tracked",
                ChannelKey::new(param.platform, param.handle)
            )));
        }

        let binding = RoleBinding::from_entity(RoleBindingRepository::new(self.db).upsert(param).await?)?;
        tracing::info!(
            "Bound role {} for member {} in guild {} to {}",
            binding.role_id,
            binding.user_id,
            binding.guild_id,
            binding.key()
        );

        Ok(binding)
    }

    pub async fn list(&self) -> Result<Vec<RoleBinding>, AppError> {
        RoleBindingRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .map(RoleBinding::from_entity)
            .collect()
    }

    /// # Returns
    /// - `Ok(())` - Binding removed
    /// - `Err(AppError::NotFound)` - No binding with that ID
    pub async fn unbind(&self, id: i32) -> Result<(), AppError> {
        let deleted = RoleBindingRepository::new(self.db).delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("Role binding {} not found", id)));
        }
        Ok(())
    }

    /// Drops every binding to a role deleted from Discord.
    pub async fn remove_deleted_role(&self, role_id: u64) -> Result<u64, AppError> {
        let deleted = RoleBindingRepository::new(self.db)
            .delete_by_role_id(role_id)
            .await?;

        if deleted > 0 {
            tracing::info!("Removed {} role bindings for deleted role {}", deleted, role_id);
        }

        Ok(deleted)
    }
}
