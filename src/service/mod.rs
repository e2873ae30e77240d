pub mod notification;
pub mod prober;
pub mod role_binding;
pub mod streamer;
pub mod target;
pub mod watcher;

#[cfg(test)]
mod test;
