//! Label summary publishing.
//!
//! At most one live message exists per label per guild. A recorded message is
//! edited in place; when that message has been deleted a replacement is created
//! and recorded. Only Discord's "unknown message" answer triggers the
//! replacement, every other edit failure is returned to the caller.

use serenity::all::{ChannelId, MessageId};

use crate::{
    error::AppError,
    model::{embed::IssueEmbed, guild::GuildState, label::TrackedLabel},
    service::discord::{DiscordGateway, EditOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Edited(MessageId),
    /// A new message was posted, either for the first time or to replace a
    /// deleted one.
    Created(MessageId),
}

pub struct EmbedPublisher<'a> {
    discord: &'a dyn DiscordGateway,
}

impl<'a> EmbedPublisher<'a> {
    pub fn new(discord: &'a dyn DiscordGateway) -> Self {
        Self { discord }
    }

    /// Publishes a label's summary to the guild's channel.
    ///
    /// # Arguments
    /// - `state` - Guild state holding the recorded message ids; updated on create
    /// - `channel_id` - The guild's issues channel
    /// - `label` - Label the summary belongs to
    /// - `embed` - Rendered summary
    ///
    /// # Returns
    /// - `Ok(PublishOutcome::Edited)` - Recorded message updated in place
    /// - `Ok(PublishOutcome::Created)` - New message posted and recorded
    /// - `Err(AppError)` - Edit failed for a reason other than a missing message,
    ///   or the new message could not be sent
    pub async fn publish(
        &self,
        state: &mut GuildState,
        channel_id: ChannelId,
        label: &TrackedLabel,
        embed: &IssueEmbed,
    ) -> Result<PublishOutcome, AppError> {
        if let Some(message_id) = state.message_for(label) {
            match self.discord.edit_embed(channel_id, message_id, embed).await? {
                EditOutcome::Edited => {
                    tracing::debug!(
                        "Edited '{}' message {} in guild {}",
                        label.name(),
                        message_id,
                        state.guild_id
                    );
                    return Ok(PublishOutcome::Edited(message_id));
                }
                EditOutcome::Missing => {
                    tracing::info!(
                        "Message {} for '{}' in guild {} was deleted, posting a new one",
                        message_id,
                        label.name(),
                        state.guild_id
                    );
                }
            }
        }

        let message_id = self.discord.send_embed(channel_id, embed).await?;
        state.record_message(label, message_id);

        tracing::debug!(
            "Posted '{}' message {} in guild {}",
            label.name(),
            message_id,
            state.guild_id
        );

        Ok(PublishOutcome::Created(message_id))
    }
}
