//! Database repository layer.
//!
//! Repositories perform all queries, inserts, updates and deletes through SeaORM entity
//! models and return entity models; services convert them into domain models.

pub mod live_state;
pub mod notification_target;
pub mod role_binding;
pub mod tracked_channel;

#[cfg(test)]
mod test;
