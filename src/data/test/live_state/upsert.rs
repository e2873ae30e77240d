use super::*;

/// Tests writing a fresh live state row.
///
/// Expected: Ok and the row converts back to the same state
#[tokio::test]
async fn stores_state_for_new_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
    let mut state = LiveState::default();
    state.apply(Transition::WentLive, now);
    let key = ChannelKey::new(Platform::Kick, "gaules");

    let repo = LiveStateRepository::new(db);
    let row = repo.upsert(&key, &state).await?;

    assert_eq!(row.platform, "kick");
    assert_eq!(row.handle, "gaules");
    assert_eq!(LiveState::from_entity(&row), state);

    Ok(())
}

/// Tests overwriting an existing row.
///
/// Expected: Ok with one row holding the offline state
#[tokio::test]
async fn overwrites_existing_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let key = ChannelKey::new(Platform::Twitch, "gaules");
    let mut state = LiveState::default();
    state.apply(Transition::WentLive, Utc::now());

    let repo = LiveStateRepository::new(db);
    let first = repo.upsert(&key, &state).await?;

    state.apply(Transition::WentOffline, Utc::now());
    let second = repo.upsert(&key, &state).await?;

    assert_eq!(first.id, second.id);
    assert!(!second.is_live);
    assert!(second.live_since.is_none());
    assert_eq!(second.notification_count, 1);
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}
