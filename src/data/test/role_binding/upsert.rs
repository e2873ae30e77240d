use super::*;

fn param(guild_id: u64, handle: &str, user_id: u64, role_id: u64) -> CreateRoleBindingParam {
    CreateRoleBindingParam {
        guild_id,
        platform: Platform::Twitch,
        handle: handle.to_string(),
        user_id,
        role_id,
    }
}

/// Tests creating a new role binding.
///
/// Expected: Ok with one binding stored
#[tokio::test]
async fn creates_new_binding() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleBindingRepository::new(db);
    let binding = repo.upsert(param(1, "gaules", 10, 100)).await?;

    assert_eq!(binding.guild_id, "1");
    assert_eq!(binding.platform, "twitch");
    assert_eq!(binding.user_id, "10");
    assert_eq!(binding.role_id, "100");
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests that binding the same guild and channel again replaces member and role.
///
/// Expected: Ok with the same row ID and updated values
#[tokio::test]
async fn replaces_binding_for_same_guild_and_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleBindingRepository::new(db);
    let first = repo.upsert(param(1, "gaules", 10, 100)).await?;
    let second = repo.upsert(param(1, "gaules", 11, 101)).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(second.user_id, "11");
    assert_eq!(second.role_id, "101");
    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests that different guilds keep independent bindings for one channel.
///
/// Expected: Ok with two rows
#[tokio::test]
async fn keeps_bindings_per_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_watch_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleBindingRepository::new(db);
    repo.upsert(param(1, "gaules", 10, 100)).await?;
    repo.upsert(param(2, "gaules", 10, 200)).await?;

    assert_eq!(repo.get_all().await?.len(), 2);

    Ok(())
}
