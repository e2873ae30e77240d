use super::*;

/// Tests creating a tracked channel.
///
/// Expected: Ok with platform and handle stored as given
#[tokio::test]
async fn creates_tracked_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TrackedChannelRepository::new(db);
    let channel = repo.create(Platform::Kick, "gaules").await?;

    assert_eq!(channel.platform, "kick");
    assert_eq!(channel.handle, "gaules");

    let stored = entity::prelude::TrackedChannel::find_by_id(channel.id)
        .one(db)
        .await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests that the same handle may be tracked on both platforms.
///
/// Expected: Ok with two distinct rows
#[tokio::test]
async fn allows_same_handle_on_different_platforms() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TrackedChannelRepository::new(db);
    let twitch = repo.create(Platform::Twitch, "gaules").await?;
    let kick = repo.create(Platform::Kick, "gaules").await?;

    assert_ne!(twitch.id, kick.id);
    assert_eq!(repo.get_all().await?.len(), 2);

    Ok(())
}
