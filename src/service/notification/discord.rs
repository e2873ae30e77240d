use async_trait::async_trait;
use chrono::Utc;
use serenity::{
    all::{ChannelId, GuildId, RoleId, UserId},
    http::Http,
};
use std::sync::Arc;

use crate::{
    error::delivery::DeliveryError,
    model::{
        live::LiveMetadata, notification_target::NotificationTarget, role_binding::RoleBinding,
        streamer::TrackedChannel,
    },
    service::notification::{builder, DeliveryReport, NotificationSink, RoleReport},
};

const ROLE_AUDIT_REASON_LIVE: &str = "Streamer went live";
const ROLE_AUDIT_REASON_OFFLINE: &str = "Streamer went offline";

/// Delivers alerts and toggles roles through the bot's Discord HTTP client.
pub struct DiscordNotificationSink {
    http: Arc<Http>,
    mention_everyone: bool,
}

impl DiscordNotificationSink {
    /// # Arguments
    /// - `http` - Discord HTTP client shared with the gateway bot
    /// - `mention_everyone` - Append `@everyone` to alert content
    pub fn new(http: Arc<Http>, mention_everyone: bool) -> Self {
        Self {
            http,
            mention_everyone,
        }
    }

    async fn toggle_role(
        &self,
        binding: &RoleBinding,
        is_live: bool,
        report: &mut RoleReport,
    ) -> Result<(), serenity::Error> {
        let guild_id = GuildId::new(binding.guild_id);
        let user_id = UserId::new(binding.user_id);
        let role_id = RoleId::new(binding.role_id);

        let member = self.http.get_member(guild_id, user_id).await?;
        let has_role = member.roles.contains(&role_id);

        if is_live && !has_role {
            self.http
                .add_member_role(guild_id, user_id, role_id, Some(ROLE_AUDIT_REASON_LIVE))
                .await?;
            report.added += 1;
            tracing::info!(
                "Added role {} to member {} in guild {} for {}",
                role_id,
                user_id,
                guild_id,
                binding.key()
            );
        } else if !is_live && has_role {
            self.http
                .remove_member_role(guild_id, user_id, role_id, Some(ROLE_AUDIT_REASON_OFFLINE))
                .await?;
            report.removed += 1;
            tracing::info!(
                "Removed role {} from member {} in guild {} for {}",
                role_id,
                user_id,
                guild_id,
                binding.key()
            );
        } else {
            report.unchanged += 1;
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationSink for DiscordNotificationSink {
    async fn notify(
        &self,
        channel: &TrackedChannel,
        metadata: &LiveMetadata,
        targets: &[NotificationTarget],
    ) -> DeliveryReport {
        let message =
            builder::build_live_message(channel, metadata, self.mention_everyone, Utc::now());
        let mut report = DeliveryReport::default();

        for target in targets {
            if target.channel_id == 0 {
                report.failed.push(DeliveryError::Rejected {
                    channel_id: target.channel_id,
                    reason: "channel ID must be non-zero".to_string(),
                });
                continue;
            }

            let channel_id = ChannelId::new(target.channel_id);
            match channel_id.send_message(&self.http, message.clone()).await {
                Ok(_) => {
                    tracing::debug!("Sent live alert for {} to channel {}", channel.key(), channel_id);
                    report.delivered.push(target.channel_id);
                }
                Err(e) => {
                    let error = DeliveryError::Discord {
                        channel_id: target.channel_id,
                        source: Box::new(e),
                    };
                    tracing::warn!("{}", error);
                    report.failed.push(error);
                }
            }
        }

        report
    }

    async fn set_presence_role(
        &self,
        channel: &TrackedChannel,
        is_live: bool,
        bindings: &[RoleBinding],
    ) -> RoleReport {
        let mut report = RoleReport::default();

        for binding in bindings
            .iter()
            .filter(|b| b.platform == channel.platform && b.handle == channel.handle)
        {
            if binding.guild_id == 0 || binding.user_id == 0 || binding.role_id == 0 {
                tracing::warn!(
                    "Skipping role binding {} for {} with a zero ID",
                    binding.id,
                    channel.key()
                );
                report.failed += 1;
                continue;
            }

            if let Err(e) = self.toggle_role(binding, is_live, &mut report).await {
                tracing::warn!(
                    "Failed to update role {} for member {} in guild {} ({}): {}",
                    binding.role_id,
                    binding.user_id,
                    binding.guild_id,
                    channel.key(),
                    e
                );
                report.failed += 1;
            }
        }

        report
    }
}
