pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_tracked_channel_table;
mod m20260301_000002_create_notification_target_table;
mod m20260301_000003_create_streamer_role_binding_table;
mod m20260308_000004_create_live_state_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_tracked_channel_table::Migration),
            Box::new(m20260301_000002_create_notification_target_table::Migration),
            Box::new(m20260301_000003_create_streamer_role_binding_table::Migration),
            Box::new(m20260308_000004_create_live_state_table::Migration),
        ]
    }
}
