use crate::{
    error::AppError,
    model::{platform::Platform, streamer::CreateTrackedChannelParam},
};
use test_utils::{builder::TestBuilder, factory};


fn tracked(platform: Platform, handle: &str) -> CreateTrackedChannelParam {
    CreateTrackedChannelParam {
        platform,
        handle: handle.to_string(),
    }
}
