pub mod role_binding;
pub mod streamer;
pub mod target;
