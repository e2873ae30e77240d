//! Live-status sources.
//!
//! A [`Prober`] answers whether one channel is live right now. Every error it returns
//! means the status is unknown for this cycle; probers never map a failure to
//! `LiveStatus::NotLive`.
//!
//! Probers are composed per platform in a [`registry::ProberRegistry`]. Kick uses a
//! [`fallback::FallbackProber`] that tries the JSON API first and the rendered page
//! second when the headless browser is enabled.

pub mod browser;
pub mod fallback;
pub mod kick_api;
pub mod kick_page;
pub mod registry;
pub mod twitch;

#[cfg(test)]
mod test;

use async_trait::async_trait;

use crate::{error::probe::ProbeError, model::live::LiveStatus};

/// User agent sent by the HTTP and browser probers.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait Prober: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Checks whether the channel with the given normalized handle is live.
    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError>;
}
