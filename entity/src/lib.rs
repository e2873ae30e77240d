pub mod prelude;

pub mod live_state;
pub mod notification_target;
pub mod streamer_role_binding;
pub mod tracked_channel;
