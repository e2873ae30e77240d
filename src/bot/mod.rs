//! Discord gateway bot.
//!
//! The bot delivers nothing itself; alerts and role changes go through the shared HTTP
//! client held by the notification sink. The gateway connection exists so the bot shows
//! as online and so deleted channels and roles are removed from the watch
//! configuration before the next poll cycle tries to use them.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Channel and role deletion events
//! - `GUILD_MEMBERS` - Member lookups for presence roles (privileged intent)
//!
//! Note: `GUILD_MEMBERS` must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod handler;
pub mod start;
