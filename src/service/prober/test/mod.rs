use crate::{
    error::probe::ProbeError,
    model::{
        live::{LiveMetadata, LiveStatus},
        platform::Platform,
    },
    service::prober::Prober,
};
use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};


/// Prober that always gives the same answer and counts calls.
struct FixedProber {
    answer: fn() -> Result<LiveStatus, ProbeError>,
    calls: AtomicUsize,
}

impl FixedProber {
    fn new(answer: fn() -> Result<LiveStatus, ProbeError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for FixedProber {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn probe(&self, _handle: &str) -> Result<LiveStatus, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.answer)()
    }
}
