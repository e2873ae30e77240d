use crate::data::notification_target::NotificationTargetRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_channel_id;
