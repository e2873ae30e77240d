//! Live alert message rendering.

use chrono::{DateTime, Utc};
use serenity::all::{
    CreateActionRow, CreateAllowedMentions, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateMessage, Timestamp,
};

use crate::model::{live::LiveMetadata, platform::Platform, streamer::TrackedChannel};

const WATCH_BUTTON_LABEL: &str = "Watch";
const KICK_FALLBACK_THUMBNAIL: &str = "https://kick.com/favicon.ico";

/// Message text above the embed, e.g. `gaules is live on Twitch! @everyone`.
pub fn build_content(channel: &TrackedChannel, mention_everyone: bool) -> String {
    let mut content = format!(
        "{} is live on {}!",
        channel.handle,
        channel.platform.display_name()
    );
    if mention_everyone {
        content.push_str(" @everyone");
    }
    content
}

/// Builds the alert embed.
///
/// # Arguments
/// - `channel` - Channel that went live
/// - `metadata` - Stream metadata reported by the prober
/// - `now` - Used as the timestamp when the platform did not report a start time
pub fn build_embed(
    channel: &TrackedChannel,
    metadata: &LiveMetadata,
    now: DateTime<Utc>,
) -> CreateEmbed {
    let platform = channel.platform;
    let url = channel.url();

    let title = metadata
        .title
        .clone()
        .unwrap_or_else(|| format!("Live on {}", platform.display_name()));

    let mut embed = CreateEmbed::new()
        .title(title)
        .url(&url)
        .color(platform.embed_color())
        .author(
            CreateEmbedAuthor::new(format!("{} - {}", channel.handle, platform.display_name()))
                .url(&url)
                .icon_url(platform.icon_url()),
        );

    let thumbnail = metadata.thumbnail_url.clone().or_else(|| match platform {
        Platform::Kick => Some(KICK_FALLBACK_THUMBNAIL.to_string()),
        Platform::Twitch => None,
    });
    if let Some(thumbnail) = thumbnail {
        embed = embed.image(thumbnail);
    }

    if let Some(category) = &metadata.category {
        embed = embed.field("Category", category, true);
    }
    if let Some(viewers) = metadata.viewer_count {
        embed = embed.field("Viewers", viewers.to_string(), true);
    }

    let started_at = metadata.started_at.unwrap_or(now);
    match Timestamp::from_unix_timestamp(started_at.timestamp()) {
        Ok(timestamp) => embed = embed.timestamp(timestamp),
        Err(e) => tracing::debug!(
            "Skipping embed timestamp {} for {}: {}",
            started_at,
            channel.key(),
            e
        ),
    }

    embed
}

/// Single row holding the link button to the channel.
pub fn build_components(channel: &TrackedChannel) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new_link(channel.url()).label(WATCH_BUTTON_LABEL),
    ])]
}

/// Assembles the full alert message.
pub fn build_live_message(
    channel: &TrackedChannel,
    metadata: &LiveMetadata,
    mention_everyone: bool,
    now: DateTime<Utc>,
) -> CreateMessage {
    CreateMessage::new()
        .content(build_content(channel, mention_everyone))
        .embed(build_embed(channel, metadata, now))
        .components(build_components(channel))
        .allowed_mentions(CreateAllowedMentions::new().everyone(mention_everyone))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(platform: Platform, handle: &str) -> TrackedChannel {
        TrackedChannel {
            id: 1,
            platform,
            handle: handle.to_string(),
            created_at: Utc::now(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_772_388_000, 0).unwrap()
    }

    #[test]
    fn content_mentions_everyone_when_enabled() {
        let channel = channel(Platform::Twitch, "gaules");

        assert_eq!(
            build_content(&channel, true),
            "gaules is live on Twitch! @everyone"
        );
        assert_eq!(build_content(&channel, false), "gaules is live on Twitch!");
    }

    #[test]
    fn twitch_embed_uses_stream_metadata() {
        let metadata = LiveMetadata {
            title: Some("Major day 3".to_string()),
            viewer_count: Some(91000),
            thumbnail_url: Some("https://cdn/thumb-640x360.jpg".to_string()),
            category: Some("Counter-Strike".to_string()),
            started_at: None,
        };

        let embed = serde_json::to_value(build_embed(
            &channel(Platform::Twitch, "gaules"),
            &metadata,
            now(),
        ))
        .unwrap();

        assert_eq!(embed["title"], "Major day 3");
        assert_eq!(embed["url"], "https://twitch.tv/gaules");
        assert_eq!(embed["color"], 0x6441a5);
        assert_eq!(embed["author"]["name"], "gaules - Twitch");
        assert_eq!(embed["image"]["url"], "https://cdn/thumb-640x360.jpg");
        assert_eq!(embed["fields"][0]["name"], "Category");
        assert_eq!(embed["fields"][0]["value"], "Counter-Strike");
        assert_eq!(embed["fields"][1]["name"], "Viewers");
        assert_eq!(embed["fields"][1]["value"], "91000");
    }

    #[test]
    fn kick_embed_falls_back_to_defaults() {
        let embed = serde_json::to_value(build_embed(
            &channel(Platform::Kick, "casimiro"),
            &LiveMetadata::default(),
            now(),
        ))
        .unwrap();

        assert_eq!(embed["title"], "Live on Kick");
        assert_eq!(embed["url"], "https://kick.com/casimiro");
        assert_eq!(embed["color"], 0x53fc18);
        assert_eq!(embed["author"]["name"], "casimiro - Kick");
        assert_eq!(embed["image"]["url"], "https://kick.com/favicon.ico");
        assert!(embed.get("fields").map_or(true, |f| f
            .as_array()
            .map_or(true, |a| a.is_empty())));
    }

    #[test]
    fn components_link_to_channel() {
        let rows = serde_json::to_value(build_components(&channel(Platform::Kick, "casimiro")))
            .unwrap();

        let button = &rows[0]["components"][0];
        assert_eq!(button["label"], "Watch");
        assert_eq!(button["url"], "https://kick.com/casimiro");
    }
}
