use crate::{data::tracked_channel::TrackedChannelRepository, model::platform::Platform};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_key;
mod find_by_key;
mod get_all;
