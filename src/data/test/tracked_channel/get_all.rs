use super::*;

/// Tests listing tracked channels.
///
/// Expected: Ok with channels ordered by platform then handle
#[tokio::test]
async fn lists_channels_in_platform_then_handle_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for (platform, handle) in [("twitch", "zeta"), ("kick", "beta"), ("twitch", "alpha")] {
        factory::tracked_channel::TrackedChannelFactory::new(db)
            .platform(platform)
            .handle(handle)
            .build()
            .await?;
    }

    let repo = TrackedChannelRepository::new(db);
    let channels = repo.get_all().await?;
    let keys: Vec<(String, String)> = channels
        .into_iter()
        .map(|c| (c.platform, c.handle))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("kick".to_string(), "beta".to_string()),
            ("twitch".to_string(), "alpha".to_string()),
            ("twitch".to_string(), "zeta".to_string()),
        ]
    );

    Ok(())
}

/// Tests listing with no tracked channels.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_when_nothing_tracked() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TrackedChannelRepository::new(db);

    assert!(repo.get_all().await?.is_empty());

    Ok(())
}
