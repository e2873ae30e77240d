use super::*;
use crate::{
    data::live_state::LiveStateRepository,
    service::{
        streamer::StreamerService,
        watcher::{cache::DbLiveStateCache, source::DbWatchConfigSource},
    },
};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

/// Prober that stops tracking the channel before reporting it live.
struct UntrackingProber {
    db: DatabaseConnection,
    platform: Platform,
}

#[async_trait]
impl Prober for UntrackingProber {
    fn name(&self) -> &'static str {
        "untracking"
    }

    async fn probe(&self, handle: &str) -> Result<LiveStatus, ProbeError> {
        StreamerService::new(&self.db)
            .remove_tracked(self.platform, handle)
            .await
            .expect("channel is tracked when probed");
        Step::Live.into_result()
    }
}

/// Tests that transitions are mirrored into the live state table.
///
/// Expected: cached row is live after the channel goes live
#[tokio::test]
async fn mirrors_transitions_into_cache() {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let source = StaticSource::new(snapshot(
        vec![channel(1, Platform::Kick, "casimiro")],
        vec![target(1, 500)],
    ));
    let prober = ScriptedProber::new();
    prober.script("casimiro", &[Step::Live]);
    let mut poller = poller(source, prober, RecordingSink::new(), ReNotifyPolicy::never())
        .with_cache(Arc::new(DbLiveStateCache::new(db.clone())));

    poller.run_cycle_at(at(0)).await;

    let rows = LiveStateRepository::new(db).get_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_live);
    assert_eq!(rows[0].notification_count, 1);
}

/// Tests restart behaviour: a new poller restored from cache does not re-alert.
///
/// Expected: one alert in total across both poller instances
#[tokio::test]
async fn restart_restores_state_from_cache() {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = snapshot(
        vec![channel(1, Platform::Twitch, "gaules")],
        vec![target(1, 500)],
    );
    let sink = RecordingSink::new();

    let prober = ScriptedProber::new();
    prober.script("gaules", &[Step::Live]);
    let mut first = poller(
        StaticSource::new(config.clone()),
        prober,
        sink.clone(),
        ReNotifyPolicy::never(),
    )
    .with_cache(Arc::new(DbLiveStateCache::new(db.clone())));
    first.run_cycle_at(at(0)).await;

    let prober = ScriptedProber::new();
    prober.script("gaules", &[Step::Live]);
    let mut second = poller(
        StaticSource::new(config),
        prober,
        sink.clone(),
        ReNotifyPolicy::never(),
    )
    .with_cache(Arc::new(DbLiveStateCache::new(db.clone())));
    let restored = second.restore_from_cache().await;
    second.run_cycle_at(at(1)).await;

    assert_eq!(restored, 1);
    assert_eq!(sink.notification_count(), 1);
}

/// Tests that cached state for untracked channels is removed.
///
/// Expected: cache row deleted during the first cycle
#[tokio::test]
async fn prunes_cache_for_untracked_channels() {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    LiveStateRepository::new(db)
        .upsert(
            &ChannelKey::new(Platform::Kick, "gone"),
            &LiveState::default(),
        )
        .await
        .unwrap();

    let mut poller = poller(
        StaticSource::new(snapshot(vec![], vec![])),
        ScriptedProber::new(),
        RecordingSink::new(),
        ReNotifyPolicy::never(),
    )
    .with_cache(Arc::new(DbLiveStateCache::new(db.clone())));
    poller.restore_from_cache().await;
    poller.run_cycle_at(at(0)).await;

    assert!(poller.states().is_empty());
    assert!(LiveStateRepository::new(db).get_all().await.unwrap().is_empty());
}

/// Tests removing a channel while its probe is in flight.
///
/// Expected: the cycle finishes normally, and the state it writes back is dropped from
/// memory and the cache on the next cycle
#[tokio::test]
async fn channel_removed_mid_cycle_is_pruned_next_cycle() -> Result<(), sea_orm::DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tracked_channel::TrackedChannelFactory::new(db)
        .platform("kick")
        .handle("casimiro")
        .build()
        .await?;
    factory::notification_target::create_notification_target(db).await?;

    let registry = ProberRegistry::new().with(
        Platform::Kick,
        Arc::new(UntrackingProber {
            db: db.clone(),
            platform: Platform::Kick,
        }),
    );
    let sink = RecordingSink::new();
    let mut poller = LiveStatusPoller::new(
        Arc::new(DbWatchConfigSource::new(db.clone())),
        registry,
        sink.clone(),
        WatcherSettings::default(),
    )
    .with_cache(Arc::new(DbLiveStateCache::new(db.clone())));

    let first = poller.run_cycle_at(at(0)).await;

    assert_eq!(first.evaluated, 1);
    assert_eq!(first.unknown, 0);
    assert_eq!(first.went_live, 1);
    assert_eq!(sink.notification_count(), 1);
    assert_eq!(LiveStateRepository::new(db).get_all().await?.len(), 1);

    let second = poller.run_cycle_at(at(1)).await;

    assert_eq!(second.evaluated, 0);
    assert!(state_of(&poller, Platform::Kick, "casimiro").is_none());
    assert!(LiveStateRepository::new(db).get_all().await?.is_empty());
    assert!(poller.published_states().read().await.is_empty());

    Ok(())
}
