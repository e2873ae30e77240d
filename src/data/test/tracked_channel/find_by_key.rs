use super::*;

/// Tests finding a tracked channel by platform and handle.
///
/// Expected: Ok(Some) for the tracked pair, Ok(None) for the other platform
#[tokio::test]
async fn finds_channel_by_platform_and_handle() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::tracked_channel::TrackedChannelFactory::new(db)
        .platform("twitch")
        .handle("casimiro")
        .build()
        .await?;

    let repo = TrackedChannelRepository::new(db);
    let found = repo.find_by_key(Platform::Twitch, "casimiro").await?;
    let missing = repo.find_by_key(Platform::Kick, "casimiro").await?;

    assert_eq!(found.map(|c| c.id), Some(created.id));
    assert!(missing.is_none());

    Ok(())
}
