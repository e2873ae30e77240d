use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LiveState::Table)
                    .if_not_exists()
                    .col(pk_auto(LiveState::Id))
                    .col(string(LiveState::Platform))
                    .col(string(LiveState::Handle))
                    .col(boolean(LiveState::IsLive).default(false))
                    .col(timestamp_null(LiveState::LiveSince))
                    .col(timestamp_null(LiveState::LastNotifiedAt))
                    .col(integer(LiveState::NotificationCount).default(0))
                    .col(
                        timestamp(LiveState::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_live_state_platform_handle")
                    .table(LiveState::Table)
                    .col(LiveState::Platform)
                    .col(LiveState::Handle)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_live_state_platform_handle")
                    .table(LiveState::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LiveState::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LiveState {
    Table,
    Id,
    Platform,
    Handle,
    IsLive,
    LiveSince,
    LastNotifiedAt,
    NotificationCount,
    UpdatedAt,
}
