use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackedChannel::Table)
                    .if_not_exists()
                    .col(pk_auto(TrackedChannel::Id))
                    .col(string(TrackedChannel::Platform))
                    .col(string(TrackedChannel::Handle))
                    .col(
                        timestamp(TrackedChannel::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (platform, handle)
        manager
            .create_index(
                Index::create()
                    .name("idx_tracked_channel_platform_handle")
                    .table(TrackedChannel::Table)
                    .col(TrackedChannel::Platform)
                    .col(TrackedChannel::Handle)
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
                    .name("idx_tracked_channel_platform_handle")
                    .table(TrackedChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TrackedChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TrackedChannel {
    Table,
    Id,
    Platform,
    Handle,
    CreatedAt,
}
