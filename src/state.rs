//! Application state shared across all request handlers.

use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};

use crate::service::{
    notification::NotificationSink, prober::registry::ProberRegistry, watcher::PublishedStates,
};

/// Shared state for the admin API.
///
/// All fields are cheap to clone: the connection is a pool and the rest are reference
/// counted.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Expected bearer token for every admin route.
    pub admin_token: Arc<str>,

    /// Probers used by the test notification endpoint.
    pub probers: ProberRegistry,

    /// Sink used by the test notification endpoint.
    pub sink: Arc<dyn NotificationSink>,

    /// Longest the test notification endpoint waits for a probe.
    pub probe_timeout: Duration,

    /// Live state published by the poller after each cycle.
    pub live_states: PublishedStates,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        admin_token: impl Into<Arc<str>>,
        probers: ProberRegistry,
        sink: Arc<dyn NotificationSink>,
        probe_timeout: Duration,
        live_states: PublishedStates,
    ) -> Self {
        Self {
            db,
            admin_token: admin_token.into(),
            probers,
            sink,
            probe_timeout,
            live_states,
        }
    }
}
