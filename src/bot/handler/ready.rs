//! Ready event handler for bot initialization.
//!
//! The ready event is fired when the bot connects to Discord's gateway and lists
//! every guild the bot is already a member of. Those guilds are handed to the
//! sync worker as one startup sweep.

use serenity::all::{Context, GuildId, Ready};
use tokio::sync::mpsc::UnboundedSender;

use crate::scheduler::queue::SyncJob;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `jobs` - Sync queue
/// - `_ctx` - Discord context (unused)
/// - `ready` - Ready event data containing the bot user and its guilds
pub async fn handle_ready(jobs: &UnboundedSender<SyncJob>, _ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord ({} guilds)",
        ready.user.name,
        ready.guilds.len()
    );

    let guild_ids: Vec<GuildId> = ready.guilds.iter().map(|guild| guild.id).collect();

    if jobs
        .send(SyncJob::Startup {
            bot_user_id: ready.user.id,
            guild_ids,
        })
        .is_err()
    {
        tracing::error!("Sync queue closed, cannot initialize guilds");
    }
}
