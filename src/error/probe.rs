//! Probe failure taxonomy.
//!
//! Every variant means the live status of a channel is unknown for this cycle. None of
//! them may be read as "offline"; the poller keeps the prior state and retries on the
//! next tick.

use std::time::Duration;
use thiserror::Error;

use crate::model::platform::Platform;

#[derive(Error, Debug)]
pub enum ProbeError {
    /// Network failure talking to the platform (DNS, connect, reset).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The probe did not finish within the configured timeout.
    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),

    /// Platform answered with an unexpected non-2xx status.
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    /// Platform refused the request (anti-bot wall, rate limit).
    #[error("Request blocked with HTTP status {status}")]
    Blocked { status: u16 },

    /// Response body did not have the expected shape.
    #[error("Malformed payload: {0}")]
    Parse(String),

    /// Access token could not be obtained.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Headless browser launch, navigation or evaluation failed.
    #[error("Browser probe failed: {0}")]
    Browser(String),

    /// No prober is configured for this platform.
    #[error("No prober available for {0}")]
    Unavailable(Platform),
}

/// Classifies reqwest failures so timeouts and decode failures keep their own variants.
impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProbeError::Parse(err.to_string())
        } else if err.is_status() {
            ProbeError::Status {
                status: err.status().map(|s| s.as_u16()).unwrap_or_default(),
            }
        } else {
            ProbeError::Transport(err)
        }
    }
}

impl From<chromiumoxide::error::CdpError> for ProbeError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ProbeError::Browser(err.to_string())
    }
}
