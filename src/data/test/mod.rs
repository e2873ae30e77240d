mod live_state;
mod notification_target;
mod role_binding;
mod tracked_channel;
