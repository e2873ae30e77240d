use super::*;

/// Tests creating a notification target with a guild.
///
/// Expected: Ok with IDs stored as strings
#[tokio::test]
async fn creates_target_with_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationTargetRepository::new(db);
    let target = repo
        .create(123456789012345678, Some(876543210987654321))
        .await?;

    assert_eq!(target.channel_id, "123456789012345678");
    assert_eq!(target.guild_id, Some("876543210987654321".to_string()));

    let found = repo.find_by_channel_id(123456789012345678).await?;
    assert_eq!(found.map(|t| t.id), Some(target.id));

    Ok(())
}

/// Tests that registering the same channel twice fails on the unique constraint.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = NotificationTargetRepository::new(db);
    repo.create(42, None).await?;
    let result = repo.create(42, None).await;

    assert!(result.is_err());
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}
