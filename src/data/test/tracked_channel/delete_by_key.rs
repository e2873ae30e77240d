use super::*;

/// Tests deleting a tracked channel.
///
/// Expected: Ok(1) and the row is gone, other channels untouched
#[tokio::test]
async fn deletes_only_matching_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::tracked_channel::TrackedChannelFactory::new(db)
        .platform("kick")
        .handle("gaules")
        .build()
        .await?;
    let other = factory::tracked_channel::TrackedChannelFactory::new(db)
        .platform("twitch")
        .handle("gaules")
        .build()
        .await?;

    let repo = TrackedChannelRepository::new(db);
    let deleted = repo.delete_by_key(Platform::Kick, "gaules").await?;

    assert_eq!(deleted, 1);
    let remaining = repo.get_all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, other.id);

    Ok(())
}

/// Tests deleting a channel that is not tracked.
///
/// Expected: Ok(0)
#[tokio::test]
async fn deleting_untracked_channel_affects_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TrackedChannelRepository::new(db);

    assert_eq!(repo.delete_by_key(Platform::Twitch, "nobody").await?, 0);

    Ok(())
}
