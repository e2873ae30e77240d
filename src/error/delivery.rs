use thiserror::Error;

/// Delivery of an alert to one notification target failed.
///
/// Logged and skipped; delivery to the remaining targets continues.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Discord rejected the request (missing access, unknown channel, rate limit).
    #[error("Failed to deliver to channel {channel_id}: {source}")]
    Discord {
        channel_id: u64,
        #[source]
        source: Box<serenity::Error>,
    },

    /// Target could not be used at all.
    #[error("Channel {channel_id} rejected delivery: {reason}")]
    Rejected { channel_id: u64, reason: String },
}

impl DeliveryError {
    pub fn channel_id(&self) -> u64 {
        match self {
            DeliveryError::Discord { channel_id, .. } => *channel_id,
            DeliveryError::Rejected { channel_id, .. } => *channel_id,
        }
    }
}
