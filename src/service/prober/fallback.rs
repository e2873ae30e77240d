use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::probe::ProbeError,
    model::{live::LiveStatus, platform::Platform},
    service::prober::Prober,
};

/// Tries each prober in order and returns the first successful answer.
///
/// `NotLive` is a successful answer and stops the chain. When every prober fails the
/// last error is returned.
pub struct FallbackProber {
    platform: Platform,
    chain: Vec<Arc<dyn Prober>>,
}

impl FallbackProber {
    pub fn new(platform: Platform, chain: Vec<Arc<dyn Prober>>) -> Self {
        Self { platform, chain }
    }
}

#[async_trait]
impl Prober for FallbackProber {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        let mut last_error = None;

        for prober in &self.chain {
            match prober.probe(handle).await {
                Ok(status) => return Ok(status),
                Err(e) => {
                    tracing::debug!(
                        prober = prober.name(),
                        handle,
                        "Probe failed, trying next source: {}",
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ProbeError::Unavailable(self.platform)))
    }
}
