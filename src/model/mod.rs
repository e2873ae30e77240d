//! Domain models and operation parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and into
//! DTOs at the controller boundary. The live-status state machine lives in `live`.

pub mod live;
pub mod notification_target;
pub mod platform;
pub mod role_binding;
pub mod streamer;
pub mod watch;
