//! Discord access used by the sync pipeline.
//!
//! The pipeline needs exactly four chat-platform calls. They sit behind
//! `DiscordGateway` so that message bookkeeping can be tested without a gateway
//! connection; `SerenityGateway` is the production implementation over the bot's
//! shared HTTP client.

use serenity::{
    all::{
        ChannelId, ChannelType, CreateMessage, EditMessage, GetMessages, GuildId, Message,
        MessageId,
    },
    async_trait,
    http::{Http, HttpError},
};
use std::sync::Arc;

use crate::{error::AppError, model::embed::IssueEmbed};

/// Discord JSON error code for "Unknown Message".
const UNKNOWN_MESSAGE_CODE: isize = 10008;

/// Result of trying to edit a previously published message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Edited,
    /// The message no longer exists, e.g. it was deleted by a moderator.
    Missing,
}

#[async_trait]
pub trait DiscordGateway: Send + Sync {
    /// Finds a guild text channel by its literal name.
    async fn find_text_channel(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<Option<ChannelId>, AppError>;

    /// Most recent messages of a channel, newest first.
    async fn recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> Result<Vec<Message>, AppError>;

    /// Posts a new message carrying the embed.
    async fn send_embed(
        &self,
        channel_id: ChannelId,
        embed: &IssueEmbed,
    ) -> Result<MessageId, AppError>;

    /// Replaces the embed of an existing message.
    ///
    /// # Returns
    /// - `Ok(EditOutcome::Edited)` - Message updated in place
    /// - `Ok(EditOutcome::Missing)` - Message does not exist anymore
    /// - `Err(AppError)` - Any other failure (permissions, network, rate limit)
    async fn edit_embed(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        embed: &IssueEmbed,
    ) -> Result<EditOutcome, AppError>;
}

pub struct SerenityGateway {
    http: Arc<Http>,
}

impl SerenityGateway {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

fn is_unknown_message(error: &serenity::Error) -> bool {
    match error {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            response.error.code == UNKNOWN_MESSAGE_CODE
        }
        _ => false,
    }
}

#[async_trait]
impl DiscordGateway for SerenityGateway {
    async fn find_text_channel(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<Option<ChannelId>, AppError> {
        let channels = self.http.get_channels(guild_id).await?;

        Ok(channels
            .into_iter()
            .find(|channel| channel.kind == ChannelType::Text && channel.name == name)
            .map(|channel| channel.id))
    }

    async fn recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> Result<Vec<Message>, AppError> {
        let messages = channel_id
            .messages(&self.http, GetMessages::new().limit(limit))
            .await?;

        Ok(messages)
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        embed: &IssueEmbed,
    ) -> Result<MessageId, AppError> {
        let new_message = CreateMessage::new().embed(embed.to_create_embed()?);
        let message = channel_id.send_message(&self.http, new_message).await?;

        Ok(message.id)
    }

    async fn edit_embed(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        embed: &IssueEmbed,
    ) -> Result<EditOutcome, AppError> {
        let edit_message = EditMessage::new().embed(embed.to_create_embed()?);

        match self
            .http
            .edit_message(channel_id, message_id, &edit_message, vec![])
            .await
        {
            Ok(_) => Ok(EditOutcome::Edited),
            Err(e) if is_unknown_message(&e) => Ok(EditOutcome::Missing),
            Err(e) => Err(e.into()),
        }
    }
}
