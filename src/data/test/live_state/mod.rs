use crate::{
    data::live_state::LiveStateRepository,
    model::{
        live::{LiveState, Transition},
        platform::Platform,
        streamer::ChannelKey,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod delete_by_key;
mod upsert;
