//! Kick rendered-page prober.
//!
//! Opens the channel page in headless Chromium, then calls the channel API from inside
//! the page so the request carries the cookies Kick's anti-bot wall hands out to real
//! browsers. When the API still answers without JSON, the live badge in the DOM decides.

use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use std::{sync::Arc, time::Duration};

use crate::{
    error::probe::ProbeError,
    model::live::{LiveMetadata, LiveStatus},
    service::prober::{browser::BrowserSession, kick_api::KickChannel, Prober},
};

/// Upper bound for random jitter added to each retry delay.
const MAX_JITTER_MS: u64 = 250;

/// Result of the in-page script.
#[derive(Debug, Deserialize)]
struct PageProbe {
    status: u16,
    #[serde(default)]
    channel: Option<serde_json::Value>,
    /// Live badge state read from the DOM; `None` when the page shows neither state.
    #[serde(default)]
    live_badge: Option<bool>,
}

pub struct KickPageProber {
    session: Arc<BrowserSession>,
    base_url: String,
    max_attempts: u32,
    backoff: Duration,
}

impl KickPageProber {
    /// # Arguments
    /// - `session` - Shared browser session
    /// - `base_url` - Kick origin, normally `https://kick.com`
    /// - `max_attempts` - Attempts per probe, at least 1
    /// - `backoff` - Delay before the second attempt; doubles after each failure
    pub fn new(
        session: Arc<BrowserSession>,
        base_url: &str,
        max_attempts: u32,
        backoff: Duration,
    ) -> Self {
        Self {
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    async fn probe_once(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        let page = self.session.page().await?;

        page.goto(format!("{}/{}", self.base_url, handle)).await?;
        if let Err(e) = page.wait_for_navigation().await {
            tracing::debug!(handle, "Kick page navigation did not settle: {}", e);
        }

        let script = page_script(handle)?;
        let probe: PageProbe = page
            .evaluate(script.as_str())
            .await?
            .into_value()
            .map_err(|e| ProbeError::Parse(format!("Unexpected page probe result: {}", e)))?;

        drop(page);

        interpret(probe)
    }

    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        let jitter = rand::rng().random_range(0..=MAX_JITTER_MS);
        self.backoff.saturating_mul(factor) + Duration::from_millis(jitter)
    }
}

#[async_trait]
impl Prober for KickPageProber {
    fn name(&self) -> &'static str {
        "kick-page"
    }

    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        let mut attempt = 1;

        loop {
            match self.probe_once(handle).await {
                Ok(status) => return Ok(status),
                Err(e) => {
                    if matches!(e, ProbeError::Browser(_)) {
                        self.session.reset().await;
                    }

                    if attempt >= self.max_attempts {
                        return Err(e);
                    }

                    let delay = self.retry_delay(attempt);
                    tracing::warn!(
                        handle,
                        attempt,
                        max_attempts = self.max_attempts,
                        "Kick page probe failed, retrying in {:?}: {}",
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// Builds the in-page function that fetches the channel API and reads the live badge.
fn page_script(handle: &str) -> Result<String, ProbeError> {
    let path = serde_json::to_string(&format!("/api/v2/channels/{}", handle))
        .map_err(|e| ProbeError::Parse(e.to_string()))?;

    Ok(format!(
        r#"async () => {{
    const badge = () => {{
        if (document.querySelector('[data-testid="live-badge"], .live-badge, [data-state="live"]')) return true;
        if (document.querySelector('[data-testid="offline-banner"], [data-state="offline"]')) return false;
        return null;
    }};
    try {{
        const res = await fetch({path}, {{ headers: {{ 'Accept': 'application/json' }}, credentials: 'include' }});
        const text = await res.text();
        try {{
            return {{ status: res.status, channel: JSON.parse(text), live_badge: badge() }};
        }} catch (_) {{
            return {{ status: res.status, channel: null, live_badge: badge() }};
        }}
    }} catch (_) {{
        return {{ status: 0, channel: null, live_badge: badge() }};
    }}
}}"#
    ))
}

fn interpret(probe: PageProbe) -> Result<LiveStatus, ProbeError> {
    if let Some(value) = probe.channel.filter(|v| v.is_object()) {
        let channel: KickChannel = serde_json::from_value(value)
            .map_err(|e| ProbeError::Parse(format!("Malformed channel payload: {}", e)))?;
        return Ok(channel.into_status());
    }

    match probe.live_badge {
        Some(true) => Ok(LiveStatus::Live(LiveMetadata::default())),
        Some(false) => Ok(LiveStatus::NotLive),
        None if probe.status == 0 => Err(ProbeError::Browser(
            "In-page request failed and no live indicator was found".to_string(),
        )),
        None => Err(ProbeError::Blocked {
            status: probe.status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn probe(status: u16, channel: serde_json::Value, live_badge: Option<bool>) -> PageProbe {
        PageProbe {
            status,
            channel: Some(channel),
            live_badge,
        }
    }

    #[test]
    fn prefers_api_payload_over_badge() {
        let result = interpret(probe(
            200,
            json!({"livestream": null, "is_banned": false}),
            Some(true),
        ));

        assert_eq!(result.unwrap(), LiveStatus::NotLive);
    }

    #[test]
    fn reads_metadata_from_api_payload() {
        let result = interpret(probe(
            200,
            json!({
                "is_banned": false,
                "livestream": {
                    "session_title": "ranked",
                    "viewer_count": 812,
                    "thumbnail": {"url": "https://thumb"},
                    "categories": [{"name": "Just Chatting"}]
                }
            }),
            None,
        ))
        .unwrap();

        let LiveStatus::Live(metadata) = result else {
            panic!("expected live status");
        };
        assert_eq!(metadata.title.as_deref(), Some("ranked"));
        assert_eq!(metadata.viewer_count, Some(812));
        assert_eq!(metadata.category.as_deref(), Some("Just Chatting"));
    }

    #[test]
    fn falls_back_to_badge_without_json() {
        let live = interpret(probe(403, serde_json::Value::Null, Some(true)));
        let offline = interpret(probe(403, serde_json::Value::Null, Some(false)));

        assert!(live.unwrap().is_live());
        assert_eq!(offline.unwrap(), LiveStatus::NotLive);
    }

    #[test]
    fn unreadable_page_is_an_error() {
        let blocked = interpret(probe(403, serde_json::Value::Null, None));
        let failed = interpret(probe(0, serde_json::Value::Null, None));

        assert!(matches!(blocked, Err(ProbeError::Blocked { status: 403 })));
        assert!(matches!(failed, Err(ProbeError::Browser(_))));
    }

    #[test]
    fn script_embeds_quoted_api_path() {
        let script = page_script("gaules").unwrap();

        assert!(script.contains(r#"fetch("/api/v2/channels/gaules""#));
    }

    #[test]
    fn retry_delay_doubles() {
        let prober = KickPageProber::new(
            Arc::new(BrowserSession::new(crate::config::BrowserConfig {
                enabled: true,
                chrome_path: None,
                max_attempts: 3,
                backoff: Duration::from_millis(2000),
            })),
            "https://kick.com",
            3,
            Duration::from_millis(2000),
        );

        let first = prober.retry_delay(1);
        let second = prober.retry_delay(2);

        assert!(first >= Duration::from_millis(2000));
        assert!(first <= Duration::from_millis(2000 + MAX_JITTER_MS));
        assert!(second >= Duration::from_millis(4000));
        assert!(second <= Duration::from_millis(4000 + MAX_JITTER_MS));
    }
}
