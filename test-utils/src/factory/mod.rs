//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for customization and
//! a `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let channel = factory::tracked_channel::TrackedChannelFactory::new(&db)
//!     .platform("kick")
//!     .handle("gaules")
//!     .build()
//!     .await?;
//! let target = factory::notification_target::create_notification_target(&db).await?;
//! ```

pub mod helpers;
pub mod notification_target;
pub mod role_binding;
pub mod tracked_channel;
