use std::{net::SocketAddr, str::FromStr, time::Duration};

use crate::error::{config::ConfigError, AppError};

const TWITCH_AUTH_URL: &str = "https://id.twitch.tv";
const TWITCH_API_URL: &str = "https://api.twitch.tv";
const KICK_URL: &str = "https://kick.com";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const MIN_POLL_INTERVAL_SECS: u64 = 5;

/// Twitch application credentials for the client-credentials flow.
#[derive(Debug, Clone)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Headless browser settings for the Kick page prober.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub enabled: bool,
    /// Chrome/Chromium executable; auto-detected when `None`.
    pub chrome_path: Option<String>,
    pub max_attempts: u32,
    /// Delay before the first retry, doubled after each further failure.
    pub backoff: Duration,
}

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub admin_token: String,
    pub bind_addr: SocketAddr,

    /// `None` disables the Twitch prober.
    pub twitch: Option<TwitchCredentials>,

    pub poll_interval: Duration,
    pub probe_timeout: Duration,
    pub probe_concurrency: usize,
    /// `None` disables re-notification for channels that stay live.
    pub renotify_cooldown: Option<Duration>,
    pub mention_everyone: bool,
    pub persist_live_state: bool,

    pub browser: BrowserConfig,

    pub twitch_auth_url: String,
    pub twitch_api_url: String,
    pub kick_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let twitch = match (optional("TWITCH_CLIENT_ID"), optional("TWITCH_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(TwitchCredentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("TWITCH_CLIENT_SECRET".to_string()).into())
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("TWITCH_CLIENT_ID".to_string()).into())
            }
        };

        let poll_interval_secs: u64 = parse_or("POLL_INTERVAL_SECS", 60)?;
        if poll_interval_secs < MIN_POLL_INTERVAL_SECS {
            return Err(ConfigError::InvalidEnvVar {
                name: "POLL_INTERVAL_SECS".to_string(),
                reason: format!("must be at least {}", MIN_POLL_INTERVAL_SECS),
            }
            .into());
        }

        let probe_concurrency: usize = parse_or("PROBE_CONCURRENCY", 4)?;
        if probe_concurrency == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "PROBE_CONCURRENCY".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let max_attempts: u32 = parse_or("BROWSER_MAX_ATTEMPTS", 3)?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "BROWSER_MAX_ATTEMPTS".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            admin_token: required("ADMIN_TOKEN")?,
            bind_addr: parse_or("BIND_ADDR", parse_default_bind_addr()?)?,
            twitch,
            poll_interval: Duration::from_secs(poll_interval_secs),
            probe_timeout: Duration::from_secs(parse_or("PROBE_TIMEOUT_SECS", 20)?),
            probe_concurrency,
            renotify_cooldown: parse_optional::<u64>("RENOTIFY_COOLDOWN_SECS")?
                .map(Duration::from_secs),
            mention_everyone: parse_or("MENTION_EVERYONE", true)?,
            persist_live_state: parse_or("PERSIST_LIVE_STATE", true)?,
            browser: BrowserConfig {
                enabled: parse_or("BROWSER_ENABLED", false)?,
                chrome_path: optional("CHROME_PATH"),
                max_attempts,
                backoff: Duration::from_millis(parse_or("BROWSER_BACKOFF_MS", 2000)?),
            },
            twitch_auth_url: TWITCH_AUTH_URL.to_string(),
            twitch_api_url: TWITCH_API_URL.to_string(),
            kick_url: KICK_URL.to_string(),
        })
    }
}

fn parse_default_bind_addr() -> Result<SocketAddr, AppError> {
    DEFAULT_BIND_ADDR.parse().map_err(|e: std::net::AddrParseError| {
        ConfigError::InvalidEnvVar {
            name: "BIND_ADDR".to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn required(name: &str) -> Result<String, AppError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()).into())
}

/// Reads a variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_optional<T>(name: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(name)
        .map(|value| parse_value(name, &value))
        .transpose()
}

fn parse_or<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_optional(name)?.unwrap_or(default))
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| {
        ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: format!("'{}': {}", value, e),
        }
        .into()
    })
}
