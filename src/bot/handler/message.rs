//! Chat command handler.
//!
//! Commands are queued behind any running sync job and answered with a reaction:
//! ✅ when the command succeeded, ❌ when it failed. `!status` additionally replies
//! with the report. Messages outside the designated channel get no reaction.

use serenity::all::{Context, Message};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    model::command::{BotCommand, CommandOutcome},
    scheduler::queue::{submit_command, SyncJob},
};

const SUCCESS_REACTION: char = '✅';
const FAILURE_REACTION: char = '❌';

/// Handle message creation in a channel
pub async fn handle_message(jobs: &UnboundedSender<SyncJob>, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    // Only guild channels carry an issue board
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let Some(command) = BotCommand::parse(&message.content) else {
        return;
    };

    let succeeded = match submit_command(jobs, guild_id, message.channel_id, command).await {
        Ok(CommandOutcome::Ignored) => return,
        Ok(CommandOutcome::Refreshed { published }) => {
            tracing::info!(
                "{:?} in guild {} published {} summaries",
                command,
                guild_id,
                published
            );
            true
        }
        Ok(CommandOutcome::Status(report)) => {
            match message.reply(&ctx.http, report.render()).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::error!("Failed to send status in guild {}: {}", guild_id, e);
                    false
                }
            }
        }
        Err(e) => {
            tracing::error!("{:?} failed in guild {}: {}", command, guild_id, e);
            false
        }
    };

    let reaction = if succeeded {
        SUCCESS_REACTION
    } else {
        FAILURE_REACTION
    };

    if let Err(e) = message.react(&ctx.http, reaction).await {
        tracing::warn!(
            "Failed to react to command in guild {}: {}",
            guild_id,
            e
        );
    }
}
