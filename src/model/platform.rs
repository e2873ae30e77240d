use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use crate::error::internal::InternalError;

/// Streaming platform a tracked channel lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitch,
    Kick,
}

impl Platform {
    /// Lowercase identifier used in storage, URLs and channel keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Kick => "kick",
        }
    }

    /// Human-readable platform name used in alerts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Twitch => "Twitch",
            Platform::Kick => "Kick",
        }
    }

    /// Public URL of a channel on this platform.
    pub fn channel_url(&self, handle: &str) -> String {
        match self {
            Platform::Twitch => format!("https://twitch.tv/{}", handle),
            Platform::Kick => format!("https://kick.com/{}", handle),
        }
    }

    pub fn icon_url(&self) -> &'static str {
        match self {
            Platform::Twitch => {
                "https://static.twitchcdn.net/assets/favicon-32-e29e246c157142c94346.png"
            }
            Platform::Kick => "https://kick.com/favicon.ico",
        }
    }

    /// Brand colour for alert embeds.
    pub fn embed_color(&self) -> u32 {
        match self {
            Platform::Twitch => 0x6441a5,
            Platform::Kick => 0x53fc18,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitch" => Ok(Platform::Twitch),
            "kick" => Ok(Platform::Kick),
            _ => Err(InternalError::UnknownPlatform(s.to_string())),
        }
    }
}
