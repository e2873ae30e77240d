use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationTarget::Table)
                    .if_not_exists()
                    .col(pk_auto(NotificationTarget::Id))
                    .col(string(NotificationTarget::ChannelId).unique_key())
                    .col(string_null(NotificationTarget::GuildId))
                    .col(
                        timestamp(NotificationTarget::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationTarget::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NotificationTarget {
    Table,
    Id,
    ChannelId,
    GuildId,
    CreatedAt,
}
