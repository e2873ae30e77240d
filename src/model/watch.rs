//! Configuration snapshot read by the poller at the start of every cycle.

use crate::model::{
    notification_target::NotificationTarget, role_binding::RoleBinding,
    streamer::{ChannelKey, TrackedChannel},
};

/// Everything one poll cycle needs from configuration storage.
#[derive(Debug, Clone, Default)]
pub struct WatchSnapshot {
    pub channels: Vec<TrackedChannel>,
    pub targets: Vec<NotificationTarget>,
    pub bindings: Vec<RoleBinding>,
}

impl WatchSnapshot {
    /// Role bindings attached to the given channel.
    pub fn bindings_for(&self, key: &ChannelKey) -> Vec<RoleBinding> {
        self.bindings
            .iter()
            .filter(|binding| binding.platform == key.platform && binding.handle == key.handle)
            .cloned()
            .collect()
    }
}
