//! Kick public channel API prober.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{header, StatusCode};
use serde::Deserialize;

use crate::{
    error::probe::ProbeError,
    model::live::{LiveMetadata, LiveStatus},
    service::prober::{Prober, BROWSER_USER_AGENT},
};

/// Statuses Kick's edge returns when it refuses a client.
const BLOCKED_STATUSES: [StatusCode; 3] = [
    StatusCode::FORBIDDEN,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::SERVICE_UNAVAILABLE,
];

#[derive(Debug, Deserialize)]
pub(crate) struct KickChannel {
    #[serde(default)]
    livestream: Option<KickLivestream>,
    #[serde(default)]
    is_banned: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct KickLivestream {
    #[serde(default)]
    session_title: Option<String>,
    #[serde(default)]
    viewer_count: Option<u64>,
    #[serde(default)]
    thumbnail: Option<KickThumbnail>,
    #[serde(default)]
    categories: Vec<KickCategory>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KickThumbnail {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KickCategory {
    name: String,
}

impl KickChannel {
    /// Live iff a livestream is present and the channel is not banned.
    pub(crate) fn into_status(self) -> LiveStatus {
        if self.is_banned.unwrap_or(false) {
            return LiveStatus::NotLive;
        }

        match self.livestream {
            Some(stream) => LiveStatus::Live(LiveMetadata {
                title: stream.session_title.filter(|t| !t.trim().is_empty()),
                viewer_count: stream.viewer_count,
                thumbnail_url: stream.thumbnail.and_then(|t| t.url),
                category: stream.categories.into_iter().next().map(|c| c.name),
                started_at: stream
                    .start_time
                    .as_deref()
                    .or(stream.created_at.as_deref())
                    .and_then(parse_kick_timestamp),
            }),
            None => LiveStatus::NotLive,
        }
    }
}

/// Kick sends either RFC 3339 or `YYYY-MM-DD HH:MM:SS` in UTC.
fn parse_kick_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

pub struct KickApiProber {
    http_client: reqwest::Client,
    base_url: String,
}

impl KickApiProber {
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `base_url` - Kick origin (`https://kick.com`); requests go to
    ///   `{base_url}/api/v2/channels/{handle}`
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Prober for KickApiProber {
    fn name(&self) -> &'static str {
        "kick-api"
    }

    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        let response = self
            .http_client
            .get(format!("{}/api/v2/channels/{}", self.base_url, handle))
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(header::REFERER, format!("{}/", self.base_url))
            .header(header::ORIGIN, &self.base_url)
            .header("sec-fetch-dest", "empty")
            .header("sec-fetch-mode", "cors")
            .header("sec-fetch-site", "same-origin")
            .send()
            .await?;

        let status = response.status();
        if BLOCKED_STATUSES.contains(&status) {
            return Err(ProbeError::Blocked {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ProbeError::Status {
                status: status.as_u16(),
            });
        }

        let channel: KickChannel = response.json().await?;

        Ok(channel.into_status())
    }
}
