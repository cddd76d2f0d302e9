//! Guild membership event handlers.
//!
//! `guild_create` fires for every guild on startup as well as for new joins. Guilds
//! present at startup are covered by the ready sweep, so only new joins are queued
//! here. `guild_delete` fires both when the bot is removed and when a guild goes
//! unavailable during an outage; only the former drops the guild's state.

use serenity::all::{Context, Guild, UnavailableGuild};
use tokio::sync::mpsc::UnboundedSender;

use crate::scheduler::queue::SyncJob;

/// Handles the guild_create event.
///
/// # Arguments
/// - `jobs` - Sync queue
/// - `_ctx` - Discord context (unused)
/// - `guild` - Guild data from Discord
/// - `is_new` - `Some(false)` for guilds the bot was already in, `None` without cache
pub async fn handle_guild_create(
    jobs: &UnboundedSender<SyncJob>,
    _ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    if is_new == Some(false) {
        return;
    }

    tracing::debug!("Guild create event: {} ({})", guild.name, guild.id);

    // Already-initialized guilds are skipped by the worker
    if jobs.send(SyncJob::Join(guild.id)).is_err() {
        tracing::error!("Sync queue closed, cannot initialize guild {}", guild.id);
    }
}

/// Handles the guild_delete event.
///
/// # Arguments
/// - `jobs` - Sync queue
/// - `_ctx` - Discord context (unused)
/// - `incomplete` - Guild id and whether the guild merely became unavailable
/// - `_full` - Cached guild data, if any (unused)
pub async fn handle_guild_delete(
    jobs: &UnboundedSender<SyncJob>,
    _ctx: Context,
    incomplete: UnavailableGuild,
    _full: Option<Guild>,
) {
    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", incomplete.id);
        return;
    }

    if jobs.send(SyncJob::Leave(incomplete.id)).is_err() {
        tracing::error!("Sync queue closed, cannot drop guild {}", incomplete.id);
    }
}
