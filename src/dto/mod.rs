//! Request and response bodies for the admin API.

pub mod api;
pub mod role_binding;
pub mod streamer;
pub mod target;
