//! Discord bot integration.
//!
//! Gateway events are translated into jobs on the sync queue; the handlers do no
//! guild work themselves. The bot's HTTP client is shared with the sync worker,
//! which uses it to read channel history and publish summaries.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive events about guild creation and deletion
//! - `GUILD_MESSAGES` - Receive chat commands in guild channels
//! - `MESSAGE_CONTENT` - Read the text of those commands (privileged intent)
//!
//! Note: `MESSAGE_CONTENT` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
