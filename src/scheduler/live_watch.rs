use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    error::AppError,
    service::watcher::{CycleSummary, LiveStatusPoller},
};

/// Running poll schedule.
///
/// Dropping the handle does not stop the schedule; call [`WatcherHandle::stop`].
pub struct WatcherHandle {
    scheduler: JobScheduler,
}

impl WatcherHandle {
    /// Stops scheduling new cycles. A cycle already running finishes on its own.
    pub async fn stop(mut self) -> Result<(), AppError> {
        self.scheduler.shutdown().await?;

        tracing::info!("Live watch scheduler stopped");

        Ok(())
    }
}

/// Starts the live watch scheduler
///
/// Runs one poll cycle immediately and then one every `interval`. A tick that fires
/// while the previous cycle is still running is skipped.
///
/// # Arguments
/// - `poller`: Poller owned by the scheduler; the admin API reads its published states
/// - `interval`: Time between cycle starts
pub async fn start_scheduler(
    poller: Arc<Mutex<LiveStatusPoller>>,
    interval: Duration,
) -> Result<WatcherHandle, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_poller = poller.clone();
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let poller = job_poller.clone();

        Box::pin(async move {
            run_tick(&poller).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Live watch scheduler started, polling every {:?}", interval);

    tokio::spawn(async move {
        run_tick(&poller).await;
    });

    Ok(WatcherHandle { scheduler })
}

/// Runs one cycle unless another one holds the poller.
///
/// # Returns
/// - `Some(CycleSummary)` - Cycle ran
/// - `None` - Tick skipped because a cycle was still in progress
pub async fn run_tick(poller: &Mutex<LiveStatusPoller>) -> Option<CycleSummary> {
    let Ok(mut poller) = poller.try_lock() else {
        tracing::warn!("Previous poll cycle still running, skipping tick");
        return None;
    };

    let summary = poller.run_cycle().await;

    tracing::debug!(
        "Poll cycle finished: {} evaluated, {} unknown, {} went live, {} renotified, {} went offline, {} delivered, {} failed deliveries",
        summary.evaluated,
        summary.unknown,
        summary.went_live,
        summary.renotified,
        summary.went_offline,
        summary.delivered,
        summary.failed_deliveries
    );

    Some(summary)
}
