use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StreamerRoleBinding::Table)
                    .if_not_exists()
                    .col(pk_auto(StreamerRoleBinding::Id))
                    .col(string(StreamerRoleBinding::GuildId))
                    .col(string(StreamerRoleBinding::Platform))
                    .col(string(StreamerRoleBinding::Handle))
                    .col(string(StreamerRoleBinding::UserId))
                    .col(string(StreamerRoleBinding::RoleId))
                    .col(
                        timestamp(StreamerRoleBinding::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // A guild binds at most one member/role per streamer
        manager
            .create_index(
                Index::create()
                    .name("idx_streamer_role_binding_unique")
                    .table(StreamerRoleBinding::Table)
                    .col(StreamerRoleBinding::GuildId)
                    .col(StreamerRoleBinding::Platform)
                    .col(StreamerRoleBinding::Handle)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_streamer_role_binding_role_id")
                    .table(StreamerRoleBinding::Table)
                    .col(StreamerRoleBinding::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_streamer_role_binding_role_id")
                    .table(StreamerRoleBinding::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_streamer_role_binding_unique")
                    .table(StreamerRoleBinding::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StreamerRoleBinding::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StreamerRoleBinding {
    Table,
    Id,
    GuildId,
    Platform,
    Handle,
    UserId,
    RoleId,
    CreatedAt,
}
