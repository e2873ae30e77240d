use super::*;

/// Tests deleting a single binding by ID.
///
/// Expected: Ok(1), then the binding cannot be found
#[tokio::test]
async fn deletes_binding_by_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let binding = factory::role_binding::RoleBindingFactory::new(db, "kick", "gaules")
        .build()
        .await?;

    let repo = RoleBindingRepository::new(db);

    assert_eq!(repo.delete(binding.id).await?, 1);
    assert!(repo.find_by_id(binding.id).await?.is_none());
    assert_eq!(repo.delete(binding.id).await?, 0);

    Ok(())
}

/// Tests deleting every binding of a channel across guilds.
///
/// Expected: Ok(2) and the binding for another channel survives
#[tokio::test]
async fn deletes_all_bindings_for_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::role_binding::RoleBindingFactory::new(db, "kick", "gaules")
        .build()
        .await?;
    factory::role_binding::RoleBindingFactory::new(db, "kick", "gaules")
        .build()
        .await?;
    let survivor = factory::role_binding::RoleBindingFactory::new(db, "twitch", "gaules")
        .build()
        .await?;

    let repo = RoleBindingRepository::new(db);
    let deleted = repo.delete_by_channel(Platform::Kick, "gaules").await?;

    assert_eq!(deleted, 2);
    let remaining = repo.get_all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor.id);

    Ok(())
}

/// Tests deleting bindings that reference a removed role.
///
/// Expected: Ok(2) for both channels bound to that role
#[tokio::test]
async fn deletes_bindings_by_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::role_binding::RoleBindingFactory::new(db, "kick", "gaules")
        .role_id("555")
        .build()
        .await?;
    factory::role_binding::RoleBindingFactory::new(db, "twitch", "casimiro")
        .role_id("555")
        .build()
        .await?;
    factory::role_binding::RoleBindingFactory::new(db, "twitch", "other")
        .role_id("556")
        .build()
        .await?;

    let repo = RoleBindingRepository::new(db);

    assert_eq!(repo.delete_by_role_id(555).await?, 2);
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}
