use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, Role, RoleId};

use crate::service::role_binding::RoleBindingService;

/// Handles the guild_role_delete event when a role is deleted from a guild.
///
/// Drops every role binding that points at the deleted role.
///
/// # Arguments
/// - `db` - Database connection for deleting bindings
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `guild_id` - Guild the role belonged to
/// - `removed_role_id` - ID of the deleted role
/// - `_removed_role_data_if_in_cache` - Role data if it was cached (unused)
pub async fn handle_guild_role_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    guild_id: GuildId,
    removed_role_id: RoleId,
    _removed_role_data_if_in_cache: Option<Role>,
) {
    match RoleBindingService::new(db)
        .remove_deleted_role(removed_role_id.get())
        .await
    {
        Ok(0) => {}
        Ok(count) => tracing::info!(
            "Removed {} role bindings for deleted role {} in guild {}",
            count,
            removed_role_id,
            guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to remove bindings for deleted role {} in guild {}: {}",
            removed_role_id,
            guild_id,
            e
        ),
    }
}
