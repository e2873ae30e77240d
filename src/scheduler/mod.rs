pub mod live_watch;
