use crate::{
    model::{
        live::LiveMetadata, notification_target::NotificationTarget, platform::Platform,
        role_binding::RoleBinding, streamer::TrackedChannel,
    },
    service::notification::{discord::DiscordNotificationSink, NotificationSink, RoleReport},
};
use chrono::{DateTime, Utc};
use mockito::Server;
use serenity::http::HttpBuilder;
use std::sync::Arc;


const GUILD_ID: u64 = 1;
const USER_ID: u64 = 11;
const ROLE_ID: u64 = 100;

/// Sink whose Discord client talks to the mock server.
fn sink(server: &Server) -> DiscordNotificationSink {
    let http = HttpBuilder::new("bot-token")
        .proxy(server.url())
        .ratelimiter_disabled(true)
        .build();

    DiscordNotificationSink::new(Arc::new(http), false)
}

fn created_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_772_388_000, 0).unwrap()
}

fn channel() -> TrackedChannel {
    TrackedChannel {
        id: 1,
        platform: Platform::Twitch,
        handle: "gaules".to_string(),
        created_at: created_at(),
    }
}

fn binding() -> RoleBinding {
    RoleBinding {
        id: 1,
        guild_id: GUILD_ID,
        platform: Platform::Twitch,
        handle: "gaules".to_string(),
        user_id: USER_ID,
        role_id: ROLE_ID,
        created_at: created_at(),
    }
}

fn member_path() -> String {
    format!("/api/v10/guilds/{}/members/{}", GUILD_ID, USER_ID)
}

fn role_path() -> String {
    format!(
        "/api/v10/guilds/{}/members/{}/roles/{}",
        GUILD_ID, USER_ID, ROLE_ID
    )
}

/// Member lookup answering with the given role IDs.
async fn mock_member(server: &mut Server, roles: &[u64]) -> mockito::Mock {
    let roles: Vec<String> = roles.iter().map(u64::to_string).collect();

    server
        .mock("GET", member_path().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "user": { "id": USER_ID.to_string(), "username": "gaules" },
                "roles": roles,
                "joined_at": "2024-01-01T00:00:00+00:00",
                "deaf": false,
                "mute": false,
                "flags": 0
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await
}

async fn mock_role_change(server: &mut Server, method: &str, hits: usize) -> mockito::Mock {
    server
        .mock(method, role_path().as_str())
        .with_status(204)
        .expect(hits)
        .create_async()
        .await
}
