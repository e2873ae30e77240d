//! Twitch Helix prober.
//!
//! Uses an app access token from the client-credentials flow. The token is cached until
//! shortly before it expires and dropped early when Helix answers 401.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oauth2::{
    basic::BasicClient, AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
    TokenResponse, TokenUrl,
};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::{
    config::TwitchCredentials,
    error::probe::ProbeError,
    model::live::{LiveMetadata, LiveStatus},
    service::prober::Prober,
};

/// Refresh tokens this long before Twitch says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);
/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

const THUMBNAIL_WIDTH: &str = "640";
const THUMBNAIL_HEIGHT: &str = "360";

pub(crate) type TwitchOAuthClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[derive(Debug, Deserialize)]
struct HelixStreams {
    data: Vec<HelixStream>,
}

#[derive(Debug, Deserialize)]
struct HelixStream {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    viewer_count: Option<u64>,
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    game_name: Option<String>,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

struct CachedToken {
    secret: String,
    refresh_at: Instant,
}

pub struct TwitchProber {
    http_client: reqwest::Client,
    oauth_client: TwitchOAuthClient,
    client_id: String,
    api_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl TwitchProber {
    /// Creates a Twitch prober.
    ///
    /// # Arguments
    /// - `http_client` - Client used for both token and Helix requests; must not follow
    ///   redirects
    /// - `credentials` - Application client ID and secret
    /// - `auth_url` - Base URL of the Twitch identity service (`https://id.twitch.tv`)
    /// - `api_url` - Base URL of the Helix API (`https://api.twitch.tv`)
    ///
    /// # Returns
    /// - `Ok(TwitchProber)` - Ready prober; no token is fetched until the first probe
    /// - `Err(ProbeError::Auth)` - `auth_url` does not form a valid token URL
    pub fn new(
        http_client: reqwest::Client,
        credentials: &TwitchCredentials,
        auth_url: &str,
        api_url: &str,
    ) -> Result<Self, ProbeError> {
        let token_url = TokenUrl::new(format!("{}/oauth2/token", auth_url.trim_end_matches('/')))
            .map_err(|e| ProbeError::Auth(format!("Invalid Twitch token URL: {}", e)))?;

        let oauth_client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
            .set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(token_url);

        Ok(Self {
            http_client,
            oauth_client,
            client_id: credentials.client_id.clone(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    /// Returns a valid app access token, requesting a new one when needed.
    async fn access_token(&self) -> Result<String, ProbeError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.secret.clone());
            }
        }

        let response = self
            .oauth_client
            .exchange_client_credentials()
            .request_async(&self.http_client)
            .await
            .map_err(|e| ProbeError::Auth(format!("Twitch token request failed: {}", e)))?;

        let lifetime = response.expires_in().unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let secret = response.access_token().secret().clone();

        tracing::debug!("Obtained Twitch app access token valid for {:?}", lifetime);

        *cached = Some(CachedToken {
            secret: secret.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_EXPIRY_MARGIN),
        });

        Ok(secret)
    }

    async fn invalidate_token(&self) {
        self.token.lock().await.take();
    }
}

#[async_trait]
impl Prober for TwitchProber {
    fn name(&self) -> &'static str {
        "twitch-helix"
    }

    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .get(format!("{}/helix/streams", self.api_url))
            .query(&[("user_login", handle)])
            .header("Client-Id", &self.client_id)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            return Err(ProbeError::Auth(
                "Twitch rejected the app access token".to_string(),
            ));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProbeError::Blocked {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(ProbeError::Status {
                status: status.as_u16(),
            });
        }

        let streams: HelixStreams = response.json().await?;

        Ok(status_from_streams(streams))
    }
}

fn status_from_streams(streams: HelixStreams) -> LiveStatus {
    match streams.data.into_iter().find(|s| s.kind == "live") {
        Some(stream) => LiveStatus::Live(LiveMetadata {
            title: stream.title.filter(|t| !t.trim().is_empty()),
            viewer_count: stream.viewer_count,
            thumbnail_url: stream.thumbnail_url.map(|url| render_thumbnail(&url)),
            category: stream.game_name.filter(|g| !g.is_empty()),
            started_at: stream.started_at,
        }),
        None => LiveStatus::NotLive,
    }
}

/// Substitutes the size placeholders in a Helix thumbnail template.
fn render_thumbnail(template: &str) -> String {
    template
        .replace("{width}", THUMBNAIL_WIDTH)
        .replace("{height}", THUMBNAIL_HEIGHT)
}
