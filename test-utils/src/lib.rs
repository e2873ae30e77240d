//! Streamwatch Test Utils
//!
//! Shared testing utilities for the streamwatch service. Provides a builder for test
//! contexts backed by in-memory SQLite databases, plus factories for the configuration
//! rows the live watcher reads every cycle.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_tracked_channels() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_watch_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!
//!     let channel = test_utils::factory::tracked_channel::create_tracked_channel(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
