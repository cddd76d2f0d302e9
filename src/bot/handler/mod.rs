use serenity::all::{Context, EventHandler, Guild, Message, Ready, UnavailableGuild};
use serenity::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::scheduler::queue::SyncJob;

pub mod guild;
pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub jobs: UnboundedSender<SyncJob>,
}

impl Handler {
    pub fn new(jobs: UnboundedSender<SyncJob>) -> Self {
        Self { jobs }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.jobs, ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.jobs, ctx, guild, is_new).await;
    }

    /// Called when the bot leaves a guild or a guild becomes unavailable
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(&self.jobs, ctx, incomplete, full).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.jobs, ctx, message).await;
    }
}
