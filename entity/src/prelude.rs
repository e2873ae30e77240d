pub use super::live_state::Entity as LiveState;
pub use super::notification_target::Entity as NotificationTarget;
pub use super::streamer_role_binding::Entity as StreamerRoleBinding;
pub use super::tracked_channel::Entity as TrackedChannel;
