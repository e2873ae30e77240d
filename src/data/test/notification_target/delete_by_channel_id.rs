use super::*;

/// Tests deleting a notification target by channel ID.
///
/// Expected: Ok(1) and only the other target remains
#[tokio::test]
async fn deletes_target_by_channel_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::notification_target::create_notification_target(db).await?;
    let second = factory::notification_target::create_notification_target(db).await?;

    let repo = NotificationTargetRepository::new(db);
    let deleted = repo
        .delete_by_channel_id(first.channel_id.parse().unwrap())
        .await?;

    assert_eq!(deleted, 1);
    let remaining = repo.get_all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].channel_id, second.channel_id);

    Ok(())
}
