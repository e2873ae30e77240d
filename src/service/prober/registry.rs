use std::{collections::HashMap, sync::Arc};

use crate::{
    error::probe::ProbeError,
    model::{live::LiveStatus, platform::Platform, streamer::ChannelKey},
    service::prober::Prober,
};

/// Maps each platform to the prober responsible for it.
#[derive(Clone, Default)]
pub struct ProberRegistry {
    probers: HashMap<Platform, Arc<dyn Prober>>,
}

impl ProberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the prober for a platform, replacing any previous one.
    pub fn with(mut self, platform: Platform, prober: Arc<dyn Prober>) -> Self {
        self.probers.insert(platform, prober);
        self
    }

    pub fn get(&self, platform: Platform) -> Option<Arc<dyn Prober>> {
        self.probers.get(&platform).cloned()
    }

    pub fn platforms(&self) -> Vec<Platform> {
        let mut platforms: Vec<Platform> = self.probers.keys().copied().collect();
        platforms.sort();
        platforms
    }

    /// Probes a channel with its platform's prober.
    ///
    /// # Returns
    /// - `Ok(LiveStatus)` - Platform answered
    /// - `Err(ProbeError::Unavailable)` - No prober is registered for the platform
    /// - `Err(ProbeError)` - Any other probe failure
    pub async fn probe(&self, key: &ChannelKey) -> Result<LiveStatus, ProbeError> {
        let prober = self
            .get(key.platform)
            .ok_or(ProbeError::Unavailable(key.platform))?;

        prober.probe(&key.handle).await
    }
}
