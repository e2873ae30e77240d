use super::*;

/// Tests dropping cached state for one channel.
///
/// Expected: Ok(1) and the other channel's row remains
#[tokio::test]
async fn deletes_state_for_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LiveStateRepository::new(db);
    let gone = ChannelKey::new(Platform::Kick, "gaules");
    let kept = ChannelKey::new(Platform::Twitch, "gaules");
    repo.upsert(&gone, &LiveState::default()).await?;
    repo.upsert(&kept, &LiveState::default()).await?;

    assert_eq!(repo.delete_by_key(&gone).await?, 1);

    let remaining = repo.get_all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].platform, "twitch");

    Ok(())
}
