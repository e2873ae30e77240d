use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildChannel, Message};

use crate::service::target::NotificationTargetService;

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// Removes the channel from the notification targets so later alerts are not sent to
/// a channel that no longer exists.
///
/// # Arguments
/// - `db` - Database connection for deleting the target record
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let guild_id = channel.guild_id.get();
    let channel_id = channel.id.get();

    match NotificationTargetService::new(db)
        .remove_deleted_channel(channel_id)
        .await
    {
        Ok(0) => {}
        Ok(_) => tracing::info!(
            "Removed notification target {} after it was deleted from guild {}",
            channel_id,
            guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to remove deleted channel {} of guild {} from targets: {}",
            channel_id,
            guild_id,
            e
        ),
    }
}
